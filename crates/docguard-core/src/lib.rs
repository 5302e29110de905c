//! docguard core: per-document access-control and data-validation primitives.
//!
//! This crate defines the value model, the request/decision contract, the
//! schema validator and the authorization evaluator consumed by a host
//! document store. It performs no I/O and holds no shared mutable state, so
//! one evaluation may run on any thread alongside any number of others.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Policy outcomes are reported as [`Decision`] values; only malformed
//! configuration or input values surface as `DocGuardError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod policy;
pub mod schema;

/// Shared result type.
pub use error::{DocGuardError, Result};

pub use model::{
    Decision, DenyReason, Document, Fields, Identity, Operation, Outcome, OwnershipViolation,
    Request, Timestamp, Value,
};
pub use policy::CollectionPolicy;
pub use schema::{FieldKind, FieldRule, Presence, Schema, SchemaViolation, UnknownFields, WriteKind};
