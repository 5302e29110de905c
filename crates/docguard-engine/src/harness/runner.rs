use std::collections::HashMap;

use docguard_core::model::fields_from_json;
use docguard_core::{Document, Fields, Operation, Outcome, Request};

use super::scenario::{Case, ScenarioFile, Step};
use crate::policy::PolicyEngine;

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    /// None when the case passed.
    pub failure: Option<String>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub cases: Vec<CaseReport>,
}

impl Report {
    pub fn failures(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed()).count()
    }

    pub fn merge(&mut self, other: Report) {
        self.cases.extend(other.cases);
    }
}

/// Scenario runner with an in-memory stand-in for the document store.
pub struct Harness<'e> {
    engine: &'e PolicyEngine,
    store: HashMap<String, Document>,
}

impl<'e> Harness<'e> {
    pub fn new(engine: &'e PolicyEngine) -> Self {
        Self { engine, store: HashMap::new() }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.store.get(id)
    }

    /// Run every case in order; the document map is shared across cases.
    pub fn run(&mut self, file: &ScenarioFile) -> Report {
        let mut report = Report::default();
        for case in &file.cases {
            let failure = self.run_case(&file.collection, case).err();
            match &failure {
                None => tracing::info!(case = %case.name, "PASS"),
                Some(why) => tracing::warn!(case = %case.name, %why, "FAIL"),
            }
            report.cases.push(CaseReport { name: case.name.clone(), failure });
        }
        report
    }

    fn run_case(&mut self, collection: &str, case: &Case) -> std::result::Result<(), String> {
        for (i, step) in case.steps.iter().enumerate() {
            self.run_step(collection, step)
                .map_err(|e| format!("step {} ({} {}): {e}", i + 1, step.op.as_str(), step.doc))?;
        }
        Ok(())
    }

    fn run_step(&mut self, collection: &str, step: &Step) -> std::result::Result<(), String> {
        let payload: Option<Fields> = step
            .data
            .clone()
            .map(fields_from_json)
            .transpose()
            .map_err(|e| e.to_string())?;
        let identity = step.identity();
        let existing = self.store.get(&step.doc);

        let req = Request {
            operation: step.op,
            identity: &identity,
            existing,
            payload: payload.as_ref(),
        };
        let decision = self.engine.evaluate(collection, &req);

        let expected = step.expected();
        if decision.outcome() != expected {
            return Err(format!(
                "expected {}, got {} ({})",
                expected.as_str(),
                decision.outcome().as_str(),
                decision.code()
            ));
        }

        if decision.outcome() == Outcome::Allow {
            self.apply(step.op, &step.doc, payload);
        }
        Ok(())
    }

    /// Apply an allowed write to the in-memory store.
    fn apply(&mut self, op: Operation, doc_id: &str, payload: Option<Fields>) {
        match op {
            Operation::Read => {}
            Operation::Create => {
                let fields = payload.unwrap_or_default();
                self.store.insert(doc_id.to_string(), Document::new(doc_id, fields));
            }
            Operation::Update => {
                if let (Some(doc), Some(patch)) = (self.store.get_mut(doc_id), payload) {
                    doc.fields = doc.merged(&patch);
                }
            }
            Operation::Delete => {
                self.store.remove(doc_id);
            }
        }
    }
}

/// Run several scenario files against one engine, each with a fresh store.
pub fn run_files(engine: &PolicyEngine, files: &[ScenarioFile]) -> Report {
    let mut report = Report::default();
    for f in files {
        report.merge(Harness::new(engine).run(f));
    }
    report
}
