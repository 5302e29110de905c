use super::value::{Fields, Value};

/// Authenticated principal, or the distinguished unauthenticated value.
///
/// Produced by the transport layer; the engine treats it as immutable input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Unauthenticated,
    Principal(String),
}

impl Identity {
    /// Build an identity from a principal id. An empty id carries no
    /// principal and is treated as unauthenticated.
    pub fn principal(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            Identity::Unauthenticated
        } else {
            Identity::Principal(id)
        }
    }

    pub fn as_principal(&self) -> Option<&str> {
        match self {
            Identity::Principal(id) => Some(id),
            Identity::Unauthenticated => None,
        }
    }
}

impl From<Option<String>> for Identity {
    fn from(v: Option<String>) -> Self {
        v.map_or(Identity::Unauthenticated, Identity::principal)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Unauthenticated => f.write_str("<unauthenticated>"),
            Identity::Principal(id) => f.write_str(id),
        }
    }
}

/// Stored document: store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self { id: id.into(), fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Owner id held in `owner_field`, if it is a string.
    pub fn owner(&self, owner_field: &str) -> Option<&str> {
        self.get(owner_field).and_then(Value::as_str)
    }

    /// State after applying `payload` as a partial update: stored fields
    /// overlaid with every payload field.
    pub fn merged(&self, payload: &Fields) -> Fields {
        let mut out = self.fields.clone();
        for (k, v) in payload {
            out.insert(k.clone(), v.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_principal_is_unauthenticated() {
        assert_eq!(Identity::principal(""), Identity::Unauthenticated);
        assert_eq!(Identity::from(None), Identity::Unauthenticated);
        assert_eq!(Identity::from(Some("u1".to_string())).as_principal(), Some("u1"));
    }

    #[test]
    fn merge_overlays_payload() {
        let mut stored = Fields::new();
        stored.insert("userId".into(), Value::from("u1"));
        stored.insert("target".into(), Value::Integer(8));
        let doc = Document::new("e4", stored);

        let mut patch = Fields::new();
        patch.insert("target".into(), Value::Integer(9));

        let merged = doc.merged(&patch);
        assert_eq!(merged.get("target"), Some(&Value::Integer(9)));
        assert_eq!(merged.get("userId"), Some(&Value::from("u1")));
        assert_eq!(doc.owner("userId"), Some("u1"));
    }
}
