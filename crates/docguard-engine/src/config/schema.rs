use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use docguard_core::error::{DocGuardError, Result};
use docguard_core::{FieldKind, Presence, UnknownFields};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: u32,

    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DocGuardError::UnsupportedVersion);
        }
        if self.collections.is_empty() {
            return Err(DocGuardError::InvalidConfig("collections must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for c in &self.collections {
            c.validate()?;
            if !seen.insert(c.name.as_str()) {
                return Err(DocGuardError::InvalidConfig(format!(
                    "duplicate collection: {}",
                    c.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    pub name: String,

    #[serde(default = "default_owner_field")]
    pub owner_field: String,

    /// Closed schema unless set to `ignore`.
    #[serde(default)]
    pub unknown_fields: UnknownFields,

    pub fields: BTreeMap<String, FieldConfig>,
}

impl CollectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DocGuardError::InvalidConfig("collection name must not be empty".into()));
        }
        if self.owner_field.is_empty() {
            return Err(DocGuardError::InvalidConfig(format!(
                "collections[{}].owner_field must not be empty",
                self.name
            )));
        }
        if !self.fields.contains_key(&self.owner_field) {
            return Err(DocGuardError::InvalidConfig(format!(
                "collections[{}].owner_field `{}` is not a declared field",
                self.name, self.owner_field
            )));
        }
        Ok(())
    }
}

fn default_owner_field() -> String {
    "userId".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub kind: FieldKind,

    #[serde(default)]
    pub presence: Presence,

    /// Closed value set; string fields only.
    #[serde(default, rename = "enum")]
    pub allowed: Option<Vec<String>>,

    #[serde(default)]
    pub immutable: bool,
}
