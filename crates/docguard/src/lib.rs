//! Top-level facade crate for docguard.
//!
//! Re-exports the core decision model and the engine library so users can depend on a single crate.

pub mod core {
    pub use docguard_core::*;
}

pub mod engine {
    pub use docguard_engine::*;
}
