//! Configuration types

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{PipelineOptions, RunnerOptions};
use crate::domain::entities::ModuleConfig;
use crate::domain::value_objects::{ConfigWarning, RetentionPolicy};
use crate::error::HarnessResult;

/// Main configuration structure (`conformance.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub generator: GeneratorConfig,
    pub report: ReportConfig,
    pub suites: SuitesConfig,
    /// Config used for a module when it is pulled in as a dependency,
    /// keyed by module id
    pub overrides: BTreeMap<String, ModuleConfig>,
}

/// Scheduling and workspace settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Scenarios in flight at once (available parallelism when unset)
    pub concurrency: Option<usize>,
    /// Per-scenario deadline; `0` disables it
    pub timeout_secs: u64,
    pub transitive_dependencies: bool,
    pub retain_workspaces: RetentionPolicy,
    /// Parent directory for scenario workspaces (system temp dir when unset)
    pub workspace_root: Option<PathBuf>,
    pub check_determinism: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            timeout_secs: 120,
            transitive_dependencies: true,
            retain_workspaces: RetentionPolicy::default(),
            workspace_root: None,
            check_determinism: false,
        }
    }
}

impl RunConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency
            .unwrap_or_else(crate::application::run::default_concurrency)
            .max(1)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// External generator process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Executable to run for every generation request
    pub command: Option<String>,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// Deadline for a single generator invocation
    pub timeout_secs: Option<u64>,
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Failures printed per scenario before "... and N more"
    pub max_failures_shown: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_failures_shown: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitesConfig {
    /// Suite files or directories, relative to the working directory
    pub paths: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HarnessResult<Self> {
        Ok(super::loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> HarnessResult<(Self, Vec<ConfigWarning>)> {
        super::loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// `GENESIS3_*` environment overrides
    pub fn load_or_default(project_root: Option<&Path>) -> HarnessResult<LoadedConfig> {
        super::loader::load_or_default(project_root)
    }

    pub fn with_env_overrides(self) -> Self {
        super::loader::with_env_overrides(self)
    }

    /// Runner settings for this configuration
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions::default()
            .with_concurrency(self.run.effective_concurrency())
            .with_timeout(self.run.timeout())
            .with_pipeline(PipelineOptions {
                transitive_dependencies: self.run.transitive_dependencies,
                overrides: self.overrides.clone(),
                workspace_root: self.run.workspace_root.clone(),
                retention: self.run.retain_workspaces,
                check_determinism: self.run.check_determinism,
            })
    }
}

/// A configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration was read from; `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}
