//! Application Layer
//!
//! Use cases that orchestrate the harness flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `ScenarioRegistry` - Loaded suites indexed by module id
//! - `GeneratorInvoker` - Per-provider fan-out of one module config
//! - `ScenarioPipeline` - Resolve, generate and verify one scenario
//! - `ScenarioRunner` - Concurrent execution, timeouts, cancellation, reports

pub mod invoker;
pub mod pipeline;
pub mod registry;
pub mod run;

pub use invoker::GeneratorInvoker;
pub use pipeline::{plan_dependencies, MaterializationStep, PipelineOptions, ScenarioPipeline};
pub use registry::ScenarioRegistry;
pub use run::{RunSelection, RunnerOptions, ScenarioRunner};
