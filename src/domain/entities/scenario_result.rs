//! ScenarioResult entity - the verdict of one scenario execution

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::TreeDigest;

/// A single reason a scenario did not pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// An expected path is absent from the generated tree
    MissingFile { path: String },
    /// A generated file lacks an expected substring
    MissingSubstring { file: String, substring: String },
    /// The generator rejected the config, failed, or timed out
    GeneratorError { cause: String },
    /// A dependency is unknown, cyclic, or was not materialized in order
    DependencyError { module_id: String, reason: String },
}

impl Failure {
    pub fn missing_file(path: impl Into<String>) -> Self {
        Failure::MissingFile { path: path.into() }
    }

    pub fn missing_substring(file: impl Into<String>, substring: impl Into<String>) -> Self {
        Failure::MissingSubstring {
            file: file.into(),
            substring: substring.into(),
        }
    }

    pub fn generator(cause: impl Into<String>) -> Self {
        Failure::GeneratorError {
            cause: cause.into(),
        }
    }

    pub fn dependency(module_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Failure::DependencyError {
            module_id: module_id.into(),
            reason: reason.into(),
        }
    }

    /// Errors stop a scenario before verification; assertion failures don't
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Failure::GeneratorError { .. } | Failure::DependencyError { .. }
        )
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::MissingFile { path } => write!(f, "missing file: {}", path),
            Failure::MissingSubstring { file, substring } => {
                write!(f, "missing substring {:?} in {}", substring, file)
            }
            Failure::GeneratorError { cause } => write!(f, "generator error: {}", cause),
            Failure::DependencyError { module_id, reason } => {
                write!(f, "dependency error ({}): {}", module_id, reason)
            }
        }
    }
}

/// Terminal state of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Errored,
}

impl ScenarioStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioStatus::Passed => "passed",
            ScenarioStatus::Failed => "failed",
            ScenarioStatus::Errored => "errored",
        }
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-terminal stage of a scenario execution
///
/// `Pending -> Resolving -> Generating -> Verifying`, then one
/// [`ScenarioStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStage {
    Pending,
    Resolving,
    Generating,
    Verifying,
}

impl ScenarioStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioStage::Pending => "pending",
            ScenarioStage::Resolving => "resolving",
            ScenarioStage::Generating => "generating",
            ScenarioStage::Verifying => "verifying",
        }
    }
}

impl fmt::Display for ScenarioStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub module_id: String,
    pub scenario: String,
    pub status: ScenarioStatus,
    pub failures: Vec<Failure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_digest: Option<TreeDigest>,
    #[serde(default)]
    pub duration_ms: u64,
    /// Retained workspace, if the retention policy kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
}

impl ScenarioResult {
    /// Verdict from verifier output: passed when there is nothing to report
    pub fn verified(
        module_id: impl Into<String>,
        scenario: impl Into<String>,
        failures: Vec<Failure>,
    ) -> Self {
        let status = if failures.is_empty() {
            ScenarioStatus::Passed
        } else {
            ScenarioStatus::Failed
        };
        Self {
            module_id: module_id.into(),
            scenario: scenario.into(),
            status,
            failures,
            tree_digest: None,
            duration_ms: 0,
            workspace: None,
        }
    }

    /// Scenario stopped by a dependency or generator error
    pub fn errored(
        module_id: impl Into<String>,
        scenario: impl Into<String>,
        failure: Failure,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            scenario: scenario.into(),
            status: ScenarioStatus::Errored,
            failures: vec![failure],
            tree_digest: None,
            duration_ms: 0,
            workspace: None,
        }
    }

    pub fn with_digest(mut self, digest: TreeDigest) -> Self {
        self.tree_digest = Some(digest);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_workspace(mut self, workspace: PathBuf) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn is_passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// Whether two results carry the same verdict, ignoring timing and
    /// workspace location
    pub fn same_outcome(&self, other: &ScenarioResult) -> bool {
        self.module_id == other.module_id
            && self.scenario == other.scenario
            && self.status == other.status
            && self.failures == other.failures
            && self.tree_digest == other.tree_digest
    }
}
