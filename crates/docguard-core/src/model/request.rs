use std::str::FromStr;

use serde::Deserialize;

use super::document::{Document, Identity};
use super::value::Fields;
use crate::error::DocGuardError;

/// Operation kind attempted against a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    #[serde(alias = "get")]
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl FromStr for Operation {
    type Err = DocGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Operation::Create),
            "read" | "get" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(DocGuardError::InvalidValue(format!("unknown operation: {other}"))),
        }
    }
}

/// One evaluation input, borrowed from the calling store.
///
/// `existing` is the already-resolved stored document (None when absent);
/// `payload` is the submitted field set for writes.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub operation: Operation,
    pub identity: &'a Identity,
    pub existing: Option<&'a Document>,
    pub payload: Option<&'a Fields>,
}

impl<'a> Request<'a> {
    pub fn create(identity: &'a Identity, payload: &'a Fields) -> Self {
        Self { operation: Operation::Create, identity, existing: None, payload: Some(payload) }
    }

    pub fn read(identity: &'a Identity, existing: Option<&'a Document>) -> Self {
        Self { operation: Operation::Read, identity, existing, payload: None }
    }

    pub fn update(
        identity: &'a Identity,
        existing: Option<&'a Document>,
        payload: &'a Fields,
    ) -> Self {
        Self { operation: Operation::Update, identity, existing, payload: Some(payload) }
    }

    pub fn delete(identity: &'a Identity, existing: Option<&'a Document>) -> Self {
        Self { operation: Operation::Delete, identity, existing, payload: None }
    }
}
