//! Authorization evaluator.
//!
//! Combines identity, operation kind, ownership and the schema verdict into
//! a single ALLOW/DENY. Checks run in a fixed order and stop at the first
//! denial:
//! identity -> ownership -> schema (create/update only).

pub mod evaluator;

pub use evaluator::CollectionPolicy;
