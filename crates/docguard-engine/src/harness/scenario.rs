use std::fs;
use std::path::Path;

use serde::Deserialize;

use docguard_core::error::{DocGuardError, Result};
use docguard_core::{Identity, Operation, Outcome};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub collection: String,
    pub cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Requester; omitted means unauthenticated.
    #[serde(default, rename = "as")]
    pub identity: Option<String>,
    pub op: Operation,
    pub doc: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Omitted means the step must be allowed.
    #[serde(default)]
    pub expect: Option<Outcome>,
}

impl Step {
    pub fn identity(&self) -> Identity {
        Identity::from(self.identity.clone())
    }

    pub fn expected(&self) -> Outcome {
        self.expect.unwrap_or(Outcome::Allow)
    }
}

impl ScenarioFile {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| {
            DocGuardError::Internal(format!("read scenarios failed ({}): {e}", path.display()))
        })?;
        Self::load_from_str(&s)
    }

    pub fn load_from_str(s: &str) -> Result<Self> {
        let file: ScenarioFile = serde_yaml::from_str(s)
            .map_err(|e| DocGuardError::InvalidValue(format!("invalid scenario yaml: {e}")))?;
        if file.cases.is_empty() {
            return Err(DocGuardError::InvalidValue("scenario file has no cases".into()));
        }
        Ok(file)
    }
}
