//! Document, request and decision model.
//!
//! - `value`: typed field values (strict integer/float split, timestamps).
//! - `document`: requester identity and the stored document.
//! - `request`: the borrowed per-call input handed over by the store.
//! - `decision`: the ALLOW/DENY result plus its internal reason.

pub mod decision;
pub mod document;
pub mod request;
pub mod value;

pub use decision::{Decision, DenyReason, Outcome, OwnershipViolation};
pub use document::{Document, Identity};
pub use request::{Operation, Request};
pub use value::{fields_from_json, Fields, Timestamp, Value};
