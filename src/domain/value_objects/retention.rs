//! Workspace Retention Value Object
//!
//! Decides whether a scenario workspace survives the end of its run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ScenarioStatus;

/// Retention policy for scenario workspaces
///
/// - `Never`: always discard the workspace
/// - `OnFailure`: keep workspaces of failed or errored scenarios (default)
/// - `Always`: keep every workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RetentionPolicy {
    Never,
    #[default]
    OnFailure,
    Always,
}

impl RetentionPolicy {
    /// Whether a workspace that ended in `status` should be kept on disk
    pub fn retains(self, status: ScenarioStatus) -> bool {
        match self {
            RetentionPolicy::Never => false,
            RetentionPolicy::OnFailure => status != ScenarioStatus::Passed,
            RetentionPolicy::Always => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RetentionPolicy::Never => "never",
            RetentionPolicy::OnFailure => "on-failure",
            RetentionPolicy::Always => "always",
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(RetentionPolicy::Never),
            "on-failure" | "on_failure" | "failure" => Ok(RetentionPolicy::OnFailure),
            "always" => Ok(RetentionPolicy::Always),
            other => Err(format!(
                "unknown retention policy '{}' (expected never, on-failure or always)",
                other
            )),
        }
    }
}
