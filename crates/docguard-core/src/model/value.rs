//! Typed document values.
//!
//! The conversion from JSON keeps integers and floats apart: `12` is an
//! integer, `12.0` and `12.5` are floats. A strictly typed field therefore
//! never accepts a numeric-looking string or a fractional number.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{DocGuardError, Result};

/// Marker key for timestamps in JSON payloads: `{"$timestamp": 1700000000000}`.
pub const TIMESTAMP_KEY: &str = "$timestamp";

/// Field name -> value, iterated in field-name order.
pub type Fields = BTreeMap<String, Value>;

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(i64::try_from(ms).unwrap_or(i64::MAX))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

/// A single field value as seen by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(Timestamp),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Runtime kind name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DocGuardError;

    fn try_from(v: serde_json::Value) -> Result<Self> {
        use serde_json::Value as J;

        Ok(match v {
            J::Null => Value::Null,
            J::Bool(b) => Value::Boolean(b),
            J::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX or a fractional value
                None => Value::Float(n.as_f64().ok_or_else(|| {
                    DocGuardError::InvalidValue(format!("unrepresentable number: {n}"))
                })?),
            },
            J::String(s) => Value::String(s),
            J::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            J::Object(map) => {
                if map.len() == 1 {
                    if let Some(ts) = map.get(TIMESTAMP_KEY) {
                        return timestamp_from_json(ts).map(Value::Timestamp);
                    }
                }
                let mut out = BTreeMap::new();
                for (k, v) in map {
                    out.insert(k, Value::try_from(v)?);
                }
                Value::Map(out)
            }
        })
    }
}

fn timestamp_from_json(v: &serde_json::Value) -> Result<Timestamp> {
    match v {
        serde_json::Value::Number(n) => n.as_i64().map(Timestamp::from_millis).ok_or_else(|| {
            DocGuardError::InvalidValue(format!("{TIMESTAMP_KEY} must be integer millis, got {n}"))
        }),
        serde_json::Value::String(s) if s == "now" => Ok(Timestamp::now()),
        other => Err(DocGuardError::InvalidValue(format!(
            "{TIMESTAMP_KEY} must be integer millis or \"now\", got {other}"
        ))),
    }
}

/// Convert a JSON object into document fields.
pub fn fields_from_json(v: serde_json::Value) -> Result<Fields> {
    match Value::try_from(v)? {
        Value::Map(m) => Ok(m),
        other => Err(DocGuardError::InvalidValue(format!(
            "document payload must be an object, got {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_and_floats_stay_distinct() {
        assert_eq!(Value::try_from(json!(12)).unwrap(), Value::Integer(12));
        assert_eq!(Value::try_from(json!(12.0)).unwrap(), Value::Float(12.0));
        assert_eq!(Value::try_from(json!(12.5)).unwrap(), Value::Float(12.5));
        assert_eq!(Value::try_from(json!("12")).unwrap(), Value::from("12"));
    }

    #[test]
    fn timestamp_marker() {
        let v = Value::try_from(json!({ "$timestamp": 1_700_000_000_000i64 })).unwrap();
        assert_eq!(v, Value::Timestamp(Timestamp(1_700_000_000_000)));

        let now = Value::try_from(json!({ "$timestamp": "now" })).unwrap();
        assert!(matches!(now, Value::Timestamp(ts) if ts.as_millis() > 0));

        assert!(Value::try_from(json!({ "$timestamp": "yesterday" })).is_err());
    }

    #[test]
    fn marker_with_siblings_is_a_plain_map() {
        let v = Value::try_from(json!({ "$timestamp": 1, "other": 2 })).unwrap();
        assert!(matches!(v, Value::Map(m) if m.len() == 2));
    }

    #[test]
    fn payload_must_be_object() {
        let err = fields_from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_VALUE");

        let f = fields_from_json(json!({ "b": 1, "a": "x" })).unwrap();
        let keys: Vec<_> = f.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
