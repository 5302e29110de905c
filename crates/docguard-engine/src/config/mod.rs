//! Policy config loader (strict parsing).
//!
//! Loaded once at process start; the resulting `Config` is immutable and is
//! compiled into a `PolicyEngine`.

pub mod schema;

use std::fs;
use std::path::Path;

use docguard_core::error::{DocGuardError, Result};

pub use schema::{CollectionConfig, Config, FieldConfig};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        DocGuardError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<Config> {
    let cfg: Config = serde_yaml::from_str(s)
        .map_err(|e| DocGuardError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
