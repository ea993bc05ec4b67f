//! genesis3-conformance - scenario-driven conformance harness for Genesis3
//!
//! Declarative module test suites describe a module configuration, the
//! modules it depends on, and the files (and file contents) the Genesis3
//! generator must produce for it. The harness materializes dependencies in
//! order into a private workspace, runs the generator once per provider
//! (`spring`, `drf`, ...), and verifies the merged output tree.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{RunSelection, RunnerOptions, ScenarioRegistry, ScenarioRunner};
pub use config::Config;
pub use domain::entities::{
    Failure, GeneratedTree, ModuleConfig, ModuleTestSuite, RunReport, Scenario, ScenarioResult,
    ScenarioStatus, SuiteReport,
};
pub use domain::ports::{Generator, GeneratorError, RunEventSink};
pub use error::{HarnessError, HarnessResult};
