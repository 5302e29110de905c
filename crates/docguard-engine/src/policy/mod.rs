//! Policy layer (schema compilation, per-collection runtimes, evaluation).
//!
//! Compiles collection configuration into `CollectionPolicy` values once at
//! startup and evaluates store requests against them at runtime.

pub mod compile;
pub mod engine;

pub use engine::PolicyEngine;
