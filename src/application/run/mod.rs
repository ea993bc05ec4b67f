//! Run Module
//!
//! Executes scenarios on a bounded pool of worker threads and aggregates
//! their results into reports.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`RunnerOptions`, `RunSelection`)
//! - `use_case` - Scheduler and report assembly (`ScenarioRunner`)
//!
//! ## Usage
//!
//! ```ignore
//! use genesis3_conformance::application::run::{RunSelection, RunnerOptions, ScenarioRunner};
//!
//! let runner = ScenarioRunner::new(registry, generator, RunnerOptions::default());
//! let report = runner.run(&RunSelection::all());
//! ```

mod options;
mod use_case;

pub use options::{default_concurrency, RunSelection, RunnerOptions, DEFAULT_TIMEOUT};
pub use use_case::ScenarioRunner;
