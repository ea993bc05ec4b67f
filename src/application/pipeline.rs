//! Scenario Pipeline
//!
//! Runs one scenario through its stages:
//!
//! 1. Resolving - order the dependency modules and pick their configs
//! 2. Generating - materialize every dependency, then the scenario's own
//!    module, into one private workspace
//! 3. Verifying - check expected files and content against the merged tree
//!
//! Resolution problems end the scenario as `DependencyError`, generation
//! problems as `GeneratorError`. Verification failures are collected in full.
//! A dependency that is disabled cannot back its dependents and is a
//! `GeneratorError`. The pipeline checks its [`Interrupt`] between generator
//! calls and stops once the scenario is cancelled or past its deadline.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use crate::domain::entities::{
    Failure, GeneratedTree, ModuleConfig, ModuleTestSuite, Scenario, ScenarioResult,
    ScenarioStage,
};
use crate::domain::ports::{GeneratorError, RunEvent, RunEventSink};
use crate::domain::services::{verify_scenario, DependencyResolver, ModuleGraph};
use crate::domain::value_objects::{Interrupt, RetentionPolicy};
use crate::error::{HarnessError, HarnessResult};
use crate::infrastructure::fs::Workspace;

use super::invoker::GeneratorInvoker;
use super::registry::ScenarioRegistry;

/// Knobs shared by every scenario in a run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Follow dependencies of dependencies
    pub transitive_dependencies: bool,
    /// Config used instead of a module's default when it is a dependency
    pub overrides: BTreeMap<String, ModuleConfig>,
    /// Parent directory for workspaces (system temp dir when `None`)
    pub workspace_root: Option<PathBuf>,
    pub retention: RetentionPolicy,
    /// Generate a second time into a fresh workspace and compare digests
    pub check_determinism: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            transitive_dependencies: true,
            overrides: BTreeMap::new(),
            workspace_root: None,
            retention: RetentionPolicy::default(),
            check_determinism: false,
        }
    }
}

/// One dependency module to generate before the scenario's own module
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializationStep {
    pub module_id: String,
    pub config: ModuleConfig,
    /// Modules that must already be in the workspace
    pub requires: Vec<String>,
}

/// Executes single scenarios against a registry and a generator
pub struct ScenarioPipeline<'a> {
    registry: &'a ScenarioRegistry,
    invoker: &'a GeneratorInvoker,
    options: &'a PipelineOptions,
    events: &'a dyn RunEventSink,
    interrupt: Interrupt,
}

impl<'a> ScenarioPipeline<'a> {
    pub fn new(
        registry: &'a ScenarioRegistry,
        invoker: &'a GeneratorInvoker,
        options: &'a PipelineOptions,
        events: &'a dyn RunEventSink,
    ) -> Self {
        Self {
            registry,
            invoker,
            options,
            events,
            interrupt: Interrupt::none(),
        }
    }

    /// Stop between generator calls once `interrupt` trips
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Dependency modules of `scenario` in materialization order
    pub fn plan(
        &self,
        suite: &ModuleTestSuite,
        scenario: &Scenario,
    ) -> HarnessResult<Vec<MaterializationStep>> {
        plan_dependencies(self.registry, self.options, suite, scenario)
    }

    /// Generate `steps` into `workspace` in order.
    ///
    /// Refuses to generate a module whose prerequisites are not yet in the
    /// workspace, and a module that is disabled: `scenario` depends on it.
    pub fn materialize(
        &self,
        scenario: &str,
        steps: &[MaterializationStep],
        workspace: &mut Workspace,
    ) -> HarnessResult<GeneratedTree> {
        let mut tree = GeneratedTree::new();
        for step in steps {
            self.check_interrupt()?;
            ensure_materialized(workspace, &step.module_id, &step.requires)?;
            if !step.config.enabled {
                let cause = format!("module is disabled but required by scenario '{}'", scenario);
                return Err(attribute_to_dependency(
                    GeneratorError::Rejected(cause).into(),
                    &step.module_id,
                ));
            }

            let generated = self
                .invoker
                .invoke_until(&step.config, workspace, &self.interrupt)
                .map_err(|e| attribute_to_dependency(e, &step.module_id))?;
            let files = generated.len();
            tree.merge(generated)?;
            workspace.record_materialized(step.module_id.clone());

            if self.events.wants_detailed_events() {
                self.events.on_event(RunEvent::DependencyMaterialized {
                    scenario: scenario.to_string(),
                    module_id: step.module_id.clone(),
                    files,
                });
            }
        }
        Ok(tree)
    }

    /// Run one scenario to a terminal result
    pub fn run(&self, suite: &ModuleTestSuite, scenario: &Scenario) -> ScenarioResult {
        let started = Instant::now();
        let label = format!("{}-{}", suite.module_id, scenario.name);

        let mut workspace = match Workspace::create(self.options.workspace_root.as_deref(), &label)
        {
            Ok(ws) => ws,
            Err(e) => {
                return ScenarioResult::errored(
                    &suite.module_id,
                    &scenario.name,
                    Failure::generator(format!("cannot create workspace: {}", e)),
                )
                .with_duration_ms(elapsed_ms(started));
            }
        };

        let result = self.execute(suite, scenario, &mut workspace);
        let result = result.with_duration_ms(elapsed_ms(started));

        // Nobody reads the result of an interrupted scenario
        if self.options.retention.retains(result.status) && !self.interrupt.is_triggered() {
            let kept = workspace.retain();
            result.with_workspace(kept)
        } else {
            result
        }
    }

    fn execute(
        &self,
        suite: &ModuleTestSuite,
        scenario: &Scenario,
        workspace: &mut Workspace,
    ) -> ScenarioResult {
        let module_id = suite.module_id.as_str();

        self.stage(module_id, &scenario.name, ScenarioStage::Resolving);
        let steps = match self.plan(suite, scenario) {
            Ok(steps) => steps,
            Err(e) => return errored(module_id, scenario, e),
        };

        self.stage(module_id, &scenario.name, ScenarioStage::Generating);
        let tree = match self.generate(suite, scenario, &steps, workspace) {
            Ok(tree) => tree,
            Err(e) => return errored(module_id, scenario, e),
        };

        if self.options.check_determinism {
            if let Err(e) = self.recheck(suite, scenario, &steps, &tree) {
                return errored(module_id, scenario, e);
            }
        }

        self.stage(module_id, &scenario.name, ScenarioStage::Verifying);
        let failures = verify_scenario(&tree, scenario);
        ScenarioResult::verified(module_id, &scenario.name, failures).with_digest(tree.digest())
    }

    /// Dependencies, then the scenario's own module
    fn generate(
        &self,
        suite: &ModuleTestSuite,
        scenario: &Scenario,
        steps: &[MaterializationStep],
        workspace: &mut Workspace,
    ) -> HarnessResult<GeneratedTree> {
        let mut tree = self.materialize(&scenario.name, steps, workspace)?;
        self.check_interrupt()?;
        ensure_materialized(workspace, &suite.module_id, &scenario.dependencies)?;
        tree.merge(
            self.invoker
                .invoke_until(&scenario.config, workspace, &self.interrupt)?,
        )?;
        workspace.record_materialized(suite.module_id.clone());
        Ok(tree)
    }

    fn recheck(
        &self,
        suite: &ModuleTestSuite,
        scenario: &Scenario,
        steps: &[MaterializationStep],
        first: &GeneratedTree,
    ) -> HarnessResult<()> {
        let label = format!("{}-{}-recheck", suite.module_id, scenario.name);
        let mut fresh = Workspace::create(self.options.workspace_root.as_deref(), &label)?;
        let second = self.generate(suite, scenario, steps, &mut fresh)?;

        let (a, b) = (first.digest(), second.digest());
        if a != b {
            return Err(GeneratorError::Internal(format!(
                "non-deterministic output: {} != {}",
                a.short(),
                b.short()
            ))
            .into());
        }
        Ok(())
    }

    fn check_interrupt(&self) -> HarnessResult<()> {
        match self.interrupt.check() {
            Some(reason) => Err(HarnessError::Interrupted { reason }),
            None => Ok(()),
        }
    }

    fn stage(&self, module_id: &str, scenario: &str, stage: ScenarioStage) {
        if self.events.wants_detailed_events() {
            self.events.on_event(RunEvent::StageEntered {
                module_id: module_id.to_string(),
                scenario: scenario.to_string(),
                stage,
            });
        }
    }
}

/// Order the dependency modules of `scenario` and pick the config each one
/// is materialized with: an override from `options`, else the module's
/// default. Needs no generator, so it also backs suite validation.
pub fn plan_dependencies(
    registry: &ScenarioRegistry,
    options: &PipelineOptions,
    suite: &ModuleTestSuite,
    scenario: &Scenario,
) -> HarnessResult<Vec<MaterializationStep>> {
    let order = DependencyResolver::new(registry)
        .with_transitive(options.transitive_dependencies)
        .resolve(&suite.module_id, &scenario.dependencies)?;

    order
        .into_iter()
        .map(|module_id| {
            let config = options
                .overrides
                .get(&module_id)
                .or_else(|| {
                    registry
                        .suite(&module_id)
                        .and_then(ModuleTestSuite::default_config)
                })
                .cloned()
                .ok_or_else(|| HarnessError::NoDefaultConfig {
                    module_id: module_id.clone(),
                })?;

            let requires = if options.transitive_dependencies {
                registry
                    .dependencies_of(&module_id)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default()
            } else {
                Vec::new()
            };

            Ok(MaterializationStep {
                module_id,
                config,
                requires,
            })
        })
        .collect()
}

fn ensure_materialized(
    workspace: &Workspace,
    module_id: &str,
    requires: &[String],
) -> HarnessResult<()> {
    match requires.iter().find(|r| !workspace.is_materialized(r)) {
        Some(missing) => Err(HarnessError::OrderViolation {
            module_id: module_id.to_string(),
            missing: missing.clone(),
        }),
        None => Ok(()),
    }
}

/// Prefix generator errors with the dependency that caused them
fn attribute_to_dependency(error: HarnessError, module_id: &str) -> HarnessError {
    match error {
        HarnessError::Generator(GeneratorError::Rejected(m)) => HarnessError::Generator(
            GeneratorError::Rejected(format!("dependency '{}': {}", module_id, m)),
        ),
        HarnessError::Generator(GeneratorError::Internal(m)) => HarnessError::Generator(
            GeneratorError::Internal(format!("dependency '{}': {}", module_id, m)),
        ),
        other => other,
    }
}

fn errored(module_id: &str, scenario: &Scenario, error: HarnessError) -> ScenarioResult {
    let failure = if error.is_dependency_error() {
        let culprit = match &error {
            HarnessError::Resolve(e) => e.module_id().to_string(),
            HarnessError::NoDefaultConfig { module_id } => module_id.clone(),
            HarnessError::OrderViolation { missing, .. } => missing.clone(),
            _ => module_id.to_string(),
        };
        Failure::dependency(culprit, error.to_string())
    } else {
        Failure::generator(error.to_string())
    };
    ScenarioResult::errored(module_id, &scenario.name, failure)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
