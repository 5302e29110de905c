//! Conformance harness.
//!
//! Drives a `PolicyEngine` black-box from YAML scenario files: each step
//! issues one operation as some identity against a named document and
//! asserts the ALLOW/DENY outcome. Allowed writes are applied to an
//! in-memory document map so later steps (and later cases in the same
//! file) see the stored state.

pub mod runner;
pub mod scenario;

pub use runner::{CaseReport, Harness, Report};
pub use scenario::{Case, ScenarioFile, Step};
