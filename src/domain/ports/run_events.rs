//! Run Event Port
//!
//! Provides an observable interface for harness runs.
//! Enables progress reporting, NDJSON event streams for CI, and debugging.

use crate::domain::entities::{ScenarioResult, ScenarioStage};

/// Event emitted during a harness run
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Run started
    RunStarted {
        suites: usize,
        scenarios: usize,
        concurrency: usize,
    },

    /// A scenario was handed to a worker
    ScenarioStarted { module_id: String, scenario: String },

    /// A scenario moved to a new stage
    StageEntered {
        module_id: String,
        scenario: String,
        stage: ScenarioStage,
    },

    /// A dependency module was generated into the scenario workspace
    DependencyMaterialized {
        scenario: String,
        module_id: String,
        files: usize,
    },

    /// A scenario reached a terminal state
    ScenarioFinished { result: ScenarioResult },

    /// The run was cancelled; `incomplete` lists `<module>/<scenario>` of
    /// every scenario that never finished
    RunCancelled { incomplete: Vec<String> },

    /// Run completed
    RunCompleted {
        passed: usize,
        failed: usize,
        errored: usize,
        duration_ms: u64,
    },
}

/// Trait for receiving run events
///
/// Implementations can be:
/// - ConsoleEventSink: progress lines on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait RunEventSink: Send + Sync {
    /// Handle a run event
    fn on_event(&self, event: RunEvent);

    /// Whether the sink wants per-stage events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
