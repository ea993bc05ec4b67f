//! JSON Event Sink
//!
//! Outputs run events as NDJSON for CI/automation consumption.

use crate::domain::ports::{RunEvent, RunEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write one NDJSON line
    pub fn emit(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl RunEventSink for JsonEventSink {
    fn on_event(&self, event: RunEvent) {
        let json = match event {
            RunEvent::RunStarted {
                suites,
                scenarios,
                concurrency,
            } => serde_json::json!({
                "event": "start",
                "command": "run",
                "suites": suites,
                "scenarios": scenarios,
                "concurrency": concurrency,
            }),

            RunEvent::ScenarioStarted {
                module_id,
                scenario,
            } => serde_json::json!({
                "event": "scenario_start",
                "command": "run",
                "module_id": module_id,
                "scenario": scenario,
            }),

            RunEvent::StageEntered {
                module_id,
                scenario,
                stage,
            } => serde_json::json!({
                "event": "stage",
                "command": "run",
                "module_id": module_id,
                "scenario": scenario,
                "stage": stage.as_str(),
            }),

            RunEvent::DependencyMaterialized {
                scenario,
                module_id,
                files,
            } => serde_json::json!({
                "event": "dependency_materialized",
                "command": "run",
                "scenario": scenario,
                "module_id": module_id,
                "files": files,
            }),

            RunEvent::ScenarioFinished { result } => serde_json::json!({
                "event": "scenario_finish",
                "command": "run",
                "result": result,
            }),

            RunEvent::RunCancelled { incomplete } => serde_json::json!({
                "event": "cancelled",
                "command": "run",
                "incomplete": incomplete,
            }),

            RunEvent::RunCompleted {
                passed,
                failed,
                errored,
                duration_ms,
            } => {
                let status = if failed == 0 && errored == 0 {
                    "success"
                } else {
                    "failure"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "run",
                    "status": status,
                    "passed": passed,
                    "failed": failed,
                    "errored": errored,
                    "duration_ms": duration_ms,
                })
            }
        };

        self.emit(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
