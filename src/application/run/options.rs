//! Run Options
//!
//! Configuration types for harness runs.

use std::time::Duration;

use crate::application::pipeline::PipelineOptions;

/// Per-scenario time limit used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Options for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Maximum number of scenarios in flight (at least 1)
    pub concurrency: usize,
    /// Per-scenario time limit; `None` waits forever
    pub timeout: Option<Duration>,
    pub pipeline: PipelineOptions,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout: Some(DEFAULT_TIMEOUT),
            pipeline: PipelineOptions::default(),
        }
    }
}

impl RunnerOptions {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineOptions) -> Self {
        self.pipeline = pipeline;
        self
    }
}

/// Available parallelism, minimum 1
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Which scenarios a run covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSelection {
    /// Module ids to run; empty means every module
    pub modules: Vec<String>,
    /// Only scenarios with this name
    pub scenario: Option<String>,
}

impl RunSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        self.modules.push(module_id.into());
        self
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn includes_module(&self, module_id: &str) -> bool {
        self.modules.is_empty() || self.modules.iter().any(|m| m == module_id)
    }

    pub fn includes_scenario(&self, name: &str) -> bool {
        self.scenario.as_deref().map_or(true, |s| s == name)
    }
}
