use serde::Deserialize;

use crate::model::Value;

/// Expected primitive kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    /// Exact integer. Floats (even `12.0`) and numeric strings never match.
    Integer,
    /// Integer or float.
    Number,
    Boolean,
    Timestamp,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
        }
    }

    pub fn matches(self, v: &Value) -> bool {
        matches!(
            (self, v),
            (FieldKind::String, Value::String(_))
                | (FieldKind::Integer, Value::Integer(_))
                | (FieldKind::Number, Value::Integer(_) | Value::Float(_))
                | (FieldKind::Boolean, Value::Boolean(_))
                | (FieldKind::Timestamp, Value::Timestamp(_))
        )
    }
}

/// When a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Present after every write (create payload, merged update state).
    #[default]
    Required,
    /// Present in the create payload; an update's merged state may lack it.
    RequiredOnCreate,
    Optional,
}

impl Presence {
    pub fn is_required(self, write: WriteKind) -> bool {
        match self {
            Presence::Required => true,
            Presence::RequiredOnCreate => write == WriteKind::Create,
            Presence::Optional => false,
        }
    }
}

/// Policy for fields the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Closed schema.
    #[default]
    Reject,
    Ignore,
}

/// Which write produced the candidate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

/// Constraints for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub presence: Presence,
    /// Closed value set for enumeration fields (string kind only).
    pub allowed: Option<Vec<String>>,
    /// May not change once stored.
    pub immutable: bool,
}

impl FieldRule {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, presence: Presence::Required, allowed: None, immutable: false }
    }

    pub fn presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub(crate) fn permits(&self, v: &Value) -> bool {
        match (&self.allowed, v) {
            (None, _) => true,
            (Some(set), Value::String(s)) => set.iter().any(|a| a == s),
            (Some(_), _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;

    #[test]
    fn integer_kind_is_strict() {
        assert!(FieldKind::Integer.matches(&Value::Integer(12)));
        assert!(!FieldKind::Integer.matches(&Value::from("12")));
        assert!(!FieldKind::Integer.matches(&Value::Float(12.0)));
        assert!(!FieldKind::Integer.matches(&Value::Float(12.5)));
        assert!(FieldKind::Number.matches(&Value::Float(12.5)));
        assert!(FieldKind::Timestamp.matches(&Value::Timestamp(Timestamp(0))));
        assert!(!FieldKind::String.matches(&Value::Null));
    }

    #[test]
    fn presence_by_write_kind() {
        assert!(Presence::Required.is_required(WriteKind::Update));
        assert!(Presence::RequiredOnCreate.is_required(WriteKind::Create));
        assert!(!Presence::RequiredOnCreate.is_required(WriteKind::Update));
        assert!(!Presence::Optional.is_required(WriteKind::Create));
    }
}
