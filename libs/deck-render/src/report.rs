//! Job reports returned by the session.

use std::path::PathBuf;

use deck_assembly::{Assembly, GeometrySourceError};
use serde::{Serialize, Serializer};

use crate::driver::{Artifact, ScriptCheck};

/// A component left out of the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedComponent {
    pub component: &'static str,
    /// Serialized as its message under `reason`.
    #[serde(rename = "reason", serialize_with = "as_message")]
    pub error: GeometrySourceError,
}

fn as_message<S>(error: &GeometrySourceError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(error)
}

/// Outcome of one render or export job.
///
/// Failed components make the job partial, not failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub script: PathBuf,
    pub artifacts: Vec<Artifact>,
    pub failed: Vec<FailedComponent>,
    pub ignored_layout: Vec<String>,
    /// RFC 3339 completion time.
    pub finished_at: String,
}

impl JobReport {
    pub(crate) fn new(script: PathBuf, assembly: &Assembly, artifacts: Vec<Artifact>) -> Self {
        Self {
            script,
            artifacts,
            failed: failed_components(assembly),
            ignored_layout: assembly.ignored_layout.clone(),
            finished_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether some components were skipped.
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Outcome of parsing the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub script: PathBuf,
    /// Configuration warnings first, then tool diagnostics.
    pub check: ScriptCheck,
    pub failed: Vec<FailedComponent>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.check.passed()
    }
}

pub(crate) fn failed_components(assembly: &Assembly) -> Vec<FailedComponent> {
    assembly
        .failures
        .iter()
        .map(|failure| FailedComponent {
            component: failure.component,
            error: failure.error.clone(),
        })
        .collect()
}
