//! Evaluation result.
//!
//! Every reason collapses to the same outward `Outcome::Deny`; the reason is
//! kept for logs and metrics only. A missing document and a foreign document
//! are indistinguishable to the caller.

use serde::Deserialize;
use thiserror::Error;

use crate::schema::SchemaViolation;

/// Caller-visible result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Allow,
    Deny,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Allow => "ALLOW",
            Outcome::Deny => "DENY",
        }
    }
}

/// Ownership failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipViolation {
    #[error("requester is not the owner")]
    OwnerMismatch,
    #[error("owner field `{0}` is missing or not a string")]
    OwnerMissing(String),
    #[error("update attempts to change owner field `{0}`")]
    OwnerChanged(String),
}

/// Internal reason for a denial (first failing check).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DenyReason {
    #[error("unauthenticated access")]
    Unauthenticated,
    #[error("document not found")]
    NotFound,
    #[error("document already exists")]
    AlreadyExists,
    #[error("write without payload")]
    MissingPayload,
    #[error("ownership violation: {0}")]
    Ownership(OwnershipViolation),
    #[error("schema violation: {0}")]
    Schema(SchemaViolation),
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

impl DenyReason {
    /// Stable reason code for logs and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "UNAUTHENTICATED",
            DenyReason::NotFound => "NOT_FOUND",
            DenyReason::AlreadyExists => "ALREADY_EXISTS",
            DenyReason::MissingPayload => "MISSING_PAYLOAD",
            DenyReason::Ownership(_) => "OWNERSHIP_VIOLATION",
            DenyReason::Schema(_) => "SCHEMA_VIOLATION",
            DenyReason::UnknownCollection(_) => "UNKNOWN_COLLECTION",
        }
    }
}

impl From<SchemaViolation> for DenyReason {
    fn from(v: SchemaViolation) -> Self {
        DenyReason::Schema(v)
    }
}

impl From<OwnershipViolation> for DenyReason {
    fn from(v: OwnershipViolation) -> Self {
        DenyReason::Ownership(v)
    }
}

/// Decision from policy evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Strip the reason for the untrusted caller.
    pub fn outcome(&self) -> Outcome {
        match self {
            Decision::Allow => Outcome::Allow,
            Decision::Deny(_) => Outcome::Deny,
        }
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(r) => Some(r),
        }
    }

    /// Reason code, or "ALLOW" for an allowed call.
    pub fn code(&self) -> &'static str {
        match self {
            Decision::Allow => Outcome::Allow.as_str(),
            Decision::Deny(r) => r.code(),
        }
    }
}
