//! Report entities - suite-level and run-level aggregation

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Failure, ScenarioResult, ScenarioStatus};

/// Aggregated results of one module test suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub module_id: String,
    pub module_name: String,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub results: Vec<ScenarioResult>,
    /// Scenarios that never reached a terminal state (run cancelled)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incomplete: Vec<String>,
}

impl SuiteReport {
    pub fn new(module_id: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            module_name: module_name.into(),
            passed: 0,
            failed: 0,
            errored: 0,
            results: Vec::new(),
            incomplete: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ScenarioResult) {
        match result.status {
            ScenarioStatus::Passed => self.passed += 1,
            ScenarioStatus::Failed => self.failed += 1,
            ScenarioStatus::Errored => self.errored += 1,
        }
        self.results.push(result);
    }

    pub fn mark_incomplete(&mut self, scenario: impl Into<String>) {
        self.incomplete.push(scenario.into());
    }

    pub fn total(&self) -> usize {
        self.results.len() + self.incomplete.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0 && self.incomplete.is_empty()
    }

    pub fn result(&self, scenario: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.scenario == scenario)
    }

    /// Results that did not pass, in declaration order
    pub fn failing(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.is_passed())
    }

    /// Every failure with module id and scenario name attached
    pub fn all_failures(&self) -> impl Iterator<Item = (&str, &str, &Failure)> {
        self.results.iter().flat_map(|r| {
            r.failures
                .iter()
                .map(move |f| (r.module_id.as_str(), r.scenario.as_str(), f))
        })
    }
}

/// Results of a whole harness run, possibly over several suites
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cancelled: bool,
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.suites.iter().map(|s| s.passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.suites.iter().map(|s| s.failed).sum()
    }

    pub fn errored(&self) -> usize {
        self.suites.iter().map(|s| s.errored).sum()
    }

    pub fn incomplete(&self) -> usize {
        self.suites.iter().map(|s| s.incomplete.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        !self.cancelled && self.suites.iter().all(SuiteReport::is_success)
    }

    pub fn suite(&self, module_id: &str) -> Option<&SuiteReport> {
        self.suites.iter().find(|s| s.module_id == module_id)
    }

    /// Process exit code: 0 when everything passed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn duration_ms(&self) -> u64 {
        (self.finished_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }
}
