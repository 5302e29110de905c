//! docguard engine library entry.
//!
//! This crate wires strict configuration loading, per-collection policy
//! compilation, decision metrics and the conformance harness around the
//! pure evaluator in `docguard-core`. It is consumed by the `docguard`
//! binary (`main.rs`) and by integration tests.

pub mod config;
pub mod harness;
pub mod obs;
pub mod policy;

pub use policy::PolicyEngine;
