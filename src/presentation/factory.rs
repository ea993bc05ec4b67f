//! Runner Factory
//!
//! Creates the registry, generator and runner with infrastructure
//! dependencies wired up. This is the dependency injection point for the
//! binary.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{ScenarioRegistry, ScenarioRunner};
use crate::config::Config;
use crate::domain::ports::{Generator, SuiteRepository};
use crate::error::HarnessResult;
use crate::infrastructure::{FsSuiteRepository, ProcessGenerator};

/// Suite location used when neither the CLI nor the config names one
pub const DEFAULT_SUITES_DIR: &str = "suites";

/// CLI paths win over `[suites] paths`, which win over `./suites`
pub fn resolve_suite_paths(cli_paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    if !cli_paths.is_empty() {
        cli_paths.to_vec()
    } else if !config.suites.paths.is_empty() {
        config.suites.paths.clone()
    } else {
        vec![PathBuf::from(DEFAULT_SUITES_DIR)]
    }
}

/// Load and validate every suite under `paths` into a registry
pub fn load_registry(paths: &[PathBuf]) -> HarnessResult<ScenarioRegistry> {
    let suites = FsSuiteRepository::new(paths.iter().cloned()).load_all()?;
    ScenarioRegistry::new(suites)
}

/// External generator process described by `[generator]`, if any.
///
/// Without `[generator] timeout_secs` a single call may run as long as the
/// whole scenario is allowed to.
pub fn create_generator(config: &Config) -> Option<ProcessGenerator> {
    let generator = &config.generator;
    let command = generator.command.as_deref()?;
    Some(
        ProcessGenerator::new(command)
            .with_args(generator.args.iter().cloned())
            .with_env(generator.env.clone())
            .with_timeout(generator.timeout().or_else(|| config.run.timeout())),
    )
}

/// Create a runner for `registry` using the config's run settings
pub fn create_scenario_runner(
    registry: ScenarioRegistry,
    generator: Arc<dyn Generator>,
    config: &Config,
) -> ScenarioRunner {
    ScenarioRunner::new(registry, generator, config.runner_options())
}
