//! Domain Entities
//!
//! - `ModuleTestSuite` / `Scenario` - declarative test definitions
//! - `ModuleConfig` - the exact input of one generator run
//! - `GeneratedTree` - files produced for one scenario execution
//! - `ScenarioResult` / `Failure` - verdicts
//! - `SuiteReport` / `RunReport` - aggregation

mod generated_tree;
mod module_config;
mod report;
mod scenario_result;
mod suite;

pub use generated_tree::{normalize_path, GeneratedFile, GeneratedTree, TreeConflict};
pub use module_config::{FieldValue, ModuleConfig, ModuleKind};
pub use report::{RunReport, SuiteReport};
pub use scenario_result::{Failure, ScenarioResult, ScenarioStage, ScenarioStatus};
pub use suite::{FileContentCheck, ModuleDefaults, ModuleTestSuite, Scenario};
