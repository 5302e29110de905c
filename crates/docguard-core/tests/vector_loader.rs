//! JSON decision vector loader shared by policy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::Deserialize;

use docguard_core::model::fields_from_json;
use docguard_core::{
    CollectionPolicy, Document, FieldKind, FieldRule, Fields, Identity, Operation, Outcome,
    Presence, Schema, UnknownFields,
};

#[derive(Debug, Deserialize)]
pub struct DecisionVector {
    pub description: String,
    #[serde(default)]
    pub identity: Option<String>,
    pub operation: Operation,
    #[serde(default)]
    pub existing: Option<StoredDoc>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    pub expect: Outcome,
    #[serde(default)]
    pub expect_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoredDoc {
    pub id: String,
    pub fields: serde_json::Value,
}

impl DecisionVector {
    pub fn identity(&self) -> Identity {
        Identity::from(self.identity.clone())
    }

    pub fn existing(&self) -> Option<Document> {
        self.existing.as_ref().map(|d| {
            let fields = fields_from_json(d.fields.clone()).expect("stored fields");
            Document::new(d.id.clone(), fields)
        })
    }

    pub fn payload(&self) -> Option<Fields> {
        self.payload
            .clone()
            .map(|p| fields_from_json(p).expect("payload fields"))
    }
}

/// Policy used by every vector: the exercises collection.
pub fn exercises_policy() -> CollectionPolicy {
    let mut f = BTreeMap::new();
    f.insert("userId".to_string(), FieldRule::new(FieldKind::String));
    f.insert(
        "bodyPart".to_string(),
        FieldRule::new(FieldKind::String).one_of(["chest", "legs", "back"]),
    );
    f.insert("target".to_string(), FieldRule::new(FieldKind::Integer));
    f.insert(
        "createdAt".to_string(),
        FieldRule::new(FieldKind::Timestamp)
            .presence(Presence::RequiredOnCreate)
            .immutable(),
    );
    let schema = Schema::new(f, UnknownFields::Reject).unwrap();
    CollectionPolicy::new("exercises", "userId", schema).unwrap()
}
