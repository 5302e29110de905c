//! Shared error type across docguard crates.
//!
//! Expected policy outcomes are never errors; they are `Decision::Deny`.
//! This type covers start-up failures (bad configuration) and malformed
//! values handed to the conversion helpers.

use thiserror::Error;

/// Stable error codes (used by the CLI and in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration rejected at load or compile time.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Input value could not be converted into the document model.
    InvalidValue,
    /// Internal error (I/O, unexpected state).
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DocGuardError>;

/// Unified error type used by core and engine.
#[derive(Debug, Error)]
pub enum DocGuardError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl DocGuardError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DocGuardError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            DocGuardError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            DocGuardError::InvalidValue(_) => ErrorCode::InvalidValue,
            DocGuardError::Internal(_) => ErrorCode::Internal,
        }
    }
}
