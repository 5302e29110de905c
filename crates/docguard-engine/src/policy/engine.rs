use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use docguard_core::error::Result;
use docguard_core::{CollectionPolicy, Decision, DenyReason, Request};

use super::compile::compile_collection;
use crate::config::Config;
use crate::obs::metrics::EngineMetrics;

/// Label used for collections that are not configured (bounds label cardinality).
const UNKNOWN_COLLECTION_LABEL: &str = "<unknown>";

/// Multi-collection policy engine.
/// Construct once at startup, then share via Arc; evaluation never blocks.
pub struct PolicyEngine {
    collections: HashMap<String, Arc<CollectionPolicy>>,
    metrics: Arc<EngineMetrics>,
}

impl PolicyEngine {
    /// Compile every configured collection. Any failure aborts start-up.
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut collections = HashMap::new();
        for c in &cfg.collections {
            let policy = compile_collection(c)?;
            tracing::info!(
                collection = %c.name,
                owner_field = %c.owner_field,
                fields = c.fields.len(),
                "collection policy compiled"
            );
            collections.insert(c.name.clone(), Arc::new(policy));
        }

        Ok(Self {
            collections,
            metrics: Arc::new(EngineMetrics::default()),
        })
    }

    pub fn collection(&self, name: &str) -> Option<Arc<CollectionPolicy>> {
        self.collections.get(name).cloned()
    }

    /// Configured collection names, sorted.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Evaluate one store request. Unconfigured collections fail closed.
    pub fn evaluate(&self, collection: &str, req: &Request<'_>) -> Decision {
        let start = Instant::now();

        let (label, decision) = match self.collections.get(collection) {
            Some(policy) => (policy.name(), policy.evaluate(req)),
            None => {
                tracing::warn!(collection, op = req.operation.as_str(), "unknown collection");
                (
                    UNKNOWN_COLLECTION_LABEL,
                    Decision::Deny(DenyReason::UnknownCollection(collection.to_string())),
                )
            }
        };

        self.metrics.record(label, req.operation, &decision, start.elapsed());
        decision
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config;
    use docguard_core::{Fields, Identity, Outcome, Value};

    const CFG: &str = r#"
version: 1
collections:
  - name: exercises
    fields:
      userId: { kind: string }
      bodyPart: { kind: string, enum: [chest, legs, back] }
      target: { kind: integer }
      createdAt: { kind: timestamp, presence: required_on_create, immutable: true }
  - name: notes
    owner_field: author
    unknown_fields: ignore
    fields:
      author: { kind: string }
      body: { kind: string, presence: optional }
"#;

    fn engine() -> PolicyEngine {
        PolicyEngine::new(&config::load_from_str(CFG).unwrap()).unwrap()
    }

    #[test]
    fn routes_by_collection() {
        let e = engine();
        assert_eq!(e.collection_names(), vec!["exercises", "notes"]);

        let u1 = Identity::principal("u1");
        let mut note = Fields::new();
        note.insert("author".into(), Value::from("u1"));
        note.insert("mood".into(), Value::from("ok"));

        // open schema on notes, closed on exercises
        assert!(e.evaluate("notes", &Request::create(&u1, &note)).is_allow());
        assert!(!e.evaluate("exercises", &Request::create(&u1, &note)).is_allow());
    }

    #[test]
    fn unknown_collection_fails_closed() {
        let e = engine();
        let u1 = Identity::principal("u1");
        let d = e.evaluate("secrets", &Request::read(&u1, None));
        assert_eq!(d.outcome(), Outcome::Deny);
        assert_eq!(d.code(), "UNKNOWN_COLLECTION");

        let out = e.metrics().render();
        assert!(out.contains("collection=\"<unknown>\""));
        assert!(!out.contains("secrets"));
    }

    #[test]
    fn records_decisions() {
        let e = engine();
        let u1 = Identity::principal("u1");
        e.evaluate("exercises", &Request::read(&u1, None));
        e.evaluate("exercises", &Request::read(&u1, None));

        let out = e.metrics().render();
        assert!(out.contains(
            "docguard_decisions_total{code=\"NOT_FOUND\",collection=\"exercises\",op=\"read\",outcome=\"DENY\"} 2"
        ));
        assert!(out.contains("docguard_eval_duration_nanos_count"));
    }

    #[test]
    fn shared_across_threads() {
        let e = Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let e = Arc::clone(&e);
                std::thread::spawn(move || {
                    let id = Identity::principal(format!("u{i}"));
                    let mut f = Fields::new();
                    f.insert("author".into(), Value::from(format!("u{i}")));
                    e.evaluate("notes", &Request::create(&id, &f)).is_allow()
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
