use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use genesis3_conformance::application::{RunSelection, ScenarioRegistry};
use genesis3_conformance::config::Config;
use genesis3_conformance::domain::ports::RunEventSink;
use genesis3_conformance::infrastructure::{ConsoleEventSink, JsonEventSink};
use genesis3_conformance::presentation::{factory, RetainWhen};

use crate::ui::context::UiContext;
use crate::ui::report::{render_run_report, RenderOptions};

/// `run` flags that override the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub suites: Vec<PathBuf>,
    pub modules: Vec<String>,
    pub scenario: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub retain: Option<RetainWhen>,
    pub workspace_root: Option<PathBuf>,
    pub generator: Option<String>,
    pub check_determinism: bool,
    pub no_transitive: bool,
}

impl RunArgs {
    /// CLI flags take priority over config and environment
    fn apply(&self, mut config: Config) -> Config {
        if let Some(concurrency) = self.concurrency {
            config.run.concurrency = Some(concurrency);
        }
        if let Some(timeout) = self.timeout {
            config.run.timeout_secs = timeout;
        }
        if let Some(retain) = self.retain {
            config.run.retain_workspaces = retain.into();
        }
        if let Some(root) = &self.workspace_root {
            config.run.workspace_root = Some(root.clone());
        }
        if let Some(generator) = &self.generator {
            config.generator.command = Some(generator.clone());
        }
        if self.check_determinism {
            config.run.check_determinism = true;
        }
        if self.no_transitive {
            config.run.transitive_dependencies = false;
        }
        config
    }

    fn selection(&self, registry: &ScenarioRegistry) -> Result<RunSelection> {
        let mut selection = RunSelection::all();
        for module in &self.modules {
            if registry.suite(module).is_none() {
                bail!("unknown module '{}'", module);
            }
            selection = selection.with_module(module.clone());
        }

        if let Some(scenario) = &self.scenario {
            let exists = registry.scenarios().any(|(suite, s)| {
                selection.includes_module(&suite.module_id) && s.name == *scenario
            });
            if !exists {
                bail!("no scenario named '{}' in the selected modules", scenario);
            }
            selection = selection.with_scenario(scenario.clone());
        }
        Ok(selection)
    }
}

pub fn cmd_run(args: &RunArgs, config: Config, ui: &UiContext) -> Result<i32> {
    let config = args.apply(config);

    let paths = factory::resolve_suite_paths(&args.suites, &config);
    let registry = factory::load_registry(&paths)?;
    let selection = args.selection(&registry)?;

    let generator = factory::create_generator(&config).context(
        "no generator configured; pass --generator, set GENESIS3_GENERATOR, \
         or set [generator] command in conformance.toml",
    )?;

    let json_sink = ui.json.then(|| Arc::new(JsonEventSink::stdout()));
    let events: Arc<dyn RunEventSink> = match &json_sink {
        Some(sink) => Arc::clone(sink) as Arc<dyn RunEventSink>,
        None => Arc::new(ConsoleEventSink::stderr(ui.verbose, ui.color, ui.unicode)),
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        cancel_clone.store(true, Ordering::SeqCst);
    })
    .context("installing the Ctrl+C handler")?;

    let runner = factory::create_scenario_runner(registry, Arc::new(generator), &config)
        .with_events(events)
        .with_cancel_flag(cancel);

    let report = runner.run(&selection);

    if let Some(sink) = &json_sink {
        sink.emit(serde_json::json!({
            "event": "report",
            "command": "run",
            "report": report,
        }));
    }

    if !ui.json {
        if ui.caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
            for line in crate::ui::ci::scenario_annotations(&report) {
                println!("{}", line);
            }
        }
        print!(
            "{}",
            render_run_report(
                &report,
                RenderOptions {
                    color: ui.color,
                    unicode: ui.unicode,
                    max_failures: config.report.max_failures_shown,
                }
            )
        );
    }

    Ok(report.exit_code())
}
