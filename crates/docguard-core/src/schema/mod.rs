//! Schema validator.
//!
//! A `Schema` is compiled once from configuration and then applied to every
//! candidate document: presence, exact primitive kind, enumeration
//! membership and (for updates) immutability. Any single violation
//! invalidates the whole document.

pub mod field;
pub mod validator;

pub use field::{FieldKind, FieldRule, Presence, UnknownFields, WriteKind};
pub use validator::{Schema, SchemaViolation};
