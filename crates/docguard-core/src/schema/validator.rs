use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::field::{FieldKind, FieldRule, UnknownFields, WriteKind};
use crate::error::{DocGuardError, Result};
use crate::model::Fields;

/// First field-level violation found in a candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("required field `{0}` is missing")]
    MissingField(String),
    #[error("field `{field}` expected {expected}, found {found}")]
    WrongKind {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field `{field}` value `{value}` is not in the permitted set")]
    NotInEnum { field: String, value: String },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("immutable field `{0}` cannot change")]
    ImmutableField(String),
}

/// Compiled field schema for one document kind.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: BTreeMap<String, FieldRule>,
    unknown_fields: UnknownFields,
}

impl Schema {
    /// Validate the declaration itself. Errors here abort start-up.
    pub fn new(fields: BTreeMap<String, FieldRule>, unknown_fields: UnknownFields) -> Result<Self> {
        if fields.is_empty() {
            return Err(DocGuardError::InvalidConfig("schema declares no fields".into()));
        }

        for (name, rule) in &fields {
            if name.is_empty() {
                return Err(DocGuardError::InvalidConfig("field name must not be empty".into()));
            }
            let Some(allowed) = &rule.allowed else { continue };

            if rule.kind != FieldKind::String {
                return Err(DocGuardError::InvalidConfig(format!(
                    "field `{name}`: enum is only supported on string fields (kind={})",
                    rule.kind.as_str()
                )));
            }
            if allowed.is_empty() {
                return Err(DocGuardError::InvalidConfig(format!(
                    "field `{name}`: enum must not be empty"
                )));
            }
            let mut seen = BTreeSet::new();
            for v in allowed {
                if !seen.insert(v.as_str()) {
                    return Err(DocGuardError::InvalidConfig(format!(
                        "field `{name}`: duplicate enum value `{v}`"
                    )));
                }
            }
        }

        Ok(Self { fields, unknown_fields })
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Check a candidate document state. Declared fields are visited in
    /// name order first; undeclared fields are only looked at afterwards.
    pub fn validate(
        &self,
        doc: &Fields,
        write: WriteKind,
    ) -> std::result::Result<(), SchemaViolation> {
        for (name, rule) in &self.fields {
            let Some(value) = doc.get(name) else {
                if rule.presence.is_required(write) {
                    return Err(SchemaViolation::MissingField(name.clone()));
                }
                continue;
            };

            if !rule.kind.matches(value) {
                return Err(SchemaViolation::WrongKind {
                    field: name.clone(),
                    expected: rule.kind.as_str(),
                    found: value.type_name(),
                });
            }

            if !rule.permits(value) {
                return Err(SchemaViolation::NotInEnum {
                    field: name.clone(),
                    value: value.as_str().unwrap_or_default().to_string(),
                });
            }
        }

        if self.unknown_fields == UnknownFields::Reject {
            if let Some(name) = doc.keys().find(|k| !self.fields.contains_key(*k)) {
                return Err(SchemaViolation::UnknownField(name.clone()));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self, doc: &Fields, write: WriteKind) -> bool {
        self.validate(doc, write).is_ok()
    }

    /// Update-only check: the payload may not alter an immutable field.
    /// Setting one that the stored document lacks also counts as a change.
    pub fn check_immutable(
        &self,
        stored: &Fields,
        payload: &Fields,
    ) -> std::result::Result<(), SchemaViolation> {
        for (name, rule) in &self.fields {
            if !rule.immutable {
                continue;
            }
            if let Some(new) = payload.get(name) {
                if stored.get(name) != Some(new) {
                    return Err(SchemaViolation::ImmutableField(name.clone()));
                }
            }
        }
        Ok(())
    }
}
