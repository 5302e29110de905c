//! Config -> core policy compilation.

use std::collections::BTreeMap;

use docguard_core::error::{DocGuardError, Result};
use docguard_core::{CollectionPolicy, FieldRule, Schema};

use crate::config::{CollectionConfig, FieldConfig};

pub fn compile_field(raw: &FieldConfig) -> FieldRule {
    FieldRule {
        kind: raw.kind,
        presence: raw.presence,
        allowed: raw.allowed.clone(),
        immutable: raw.immutable,
    }
}

pub fn compile_schema(raw: &CollectionConfig) -> Result<Schema> {
    let fields: BTreeMap<String, FieldRule> = raw
        .fields
        .iter()
        .map(|(name, f)| (name.clone(), compile_field(f)))
        .collect();
    Schema::new(fields, raw.unknown_fields)
}

pub fn compile_collection(raw: &CollectionConfig) -> Result<CollectionPolicy> {
    compile_schema(raw)
        .and_then(|schema| CollectionPolicy::new(raw.name.clone(), raw.owner_field.clone(), schema))
        .map_err(|e| {
            DocGuardError::InvalidConfig(format!(
                "collection policy compile failed ({}): {e}",
                raw.name
            ))
        })
}
