//! Console Event Sink
//!
//! Human-readable progress lines on stderr. Silent at verbosity 0, one line
//! per scenario at 1, every stage and dependency at 2 and above.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;

use crate::domain::entities::ScenarioStatus;
use crate::domain::ports::{RunEvent, RunEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: u8,
    color: bool,
    unicode: bool,
}

impl ConsoleEventSink {
    pub fn stderr(verbose: u8, color: bool, unicode: bool) -> Self {
        Self::with_writer(io::stderr(), verbose, color, unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        verbose: u8,
        color: bool,
        unicode: bool,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
            color,
            unicode,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }

    fn status_mark(&self, status: ScenarioStatus) -> String {
        let mark = match (self.unicode, status) {
            (true, ScenarioStatus::Passed) => "✓",
            (true, ScenarioStatus::Failed) => "✗",
            (true, ScenarioStatus::Errored) => "⚠",
            (false, ScenarioStatus::Passed) => "[OK]",
            (false, ScenarioStatus::Failed) => "[FAIL]",
            (false, ScenarioStatus::Errored) => "[ERR]",
        };
        if !self.color {
            return mark.to_string();
        }
        match status {
            ScenarioStatus::Passed => mark.green().to_string(),
            ScenarioStatus::Failed => mark.red().to_string(),
            ScenarioStatus::Errored => mark.yellow().to_string(),
        }
    }

    fn dim(&self, text: String) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text
        }
    }
}

impl RunEventSink for ConsoleEventSink {
    fn on_event(&self, event: RunEvent) {
        if self.verbose == 0 {
            return;
        }

        match event {
            RunEvent::RunStarted {
                suites,
                scenarios,
                concurrency,
            } => self.line(format!(
                "Running {} scenario(s) from {} suite(s) on {} worker(s)",
                scenarios, suites, concurrency
            )),
            RunEvent::ScenarioStarted { .. } => {}
            RunEvent::StageEntered {
                module_id,
                scenario,
                stage,
            } => {
                if self.verbose >= 2 {
                    self.line(self.dim(format!("  {}/{}: {}", module_id, scenario, stage)));
                }
            }
            RunEvent::DependencyMaterialized {
                scenario,
                module_id,
                files,
            } => {
                if self.verbose >= 2 {
                    self.line(self.dim(format!(
                        "  {}: materialized {} ({} files)",
                        scenario, module_id, files
                    )));
                }
            }
            RunEvent::ScenarioFinished { result } => {
                let mut text = format!(
                    "{} {}/{} ({} ms)",
                    self.status_mark(result.status),
                    result.module_id,
                    result.scenario,
                    result.duration_ms
                );
                if !result.failures.is_empty() {
                    text.push_str(&format!(" - {} failure(s)", result.failures.len()));
                }
                self.line(text);
            }
            RunEvent::RunCancelled { incomplete } => self.line(format!(
                "Cancelled: {} scenario(s) did not complete: {}",
                incomplete.len(),
                incomplete.join(", ")
            )),
            RunEvent::RunCompleted { .. } => {}
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose >= 2
    }
}
