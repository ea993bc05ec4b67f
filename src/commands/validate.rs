use std::path::PathBuf;

use anyhow::Result;
use genesis3_conformance::application::plan_dependencies;
use genesis3_conformance::config::Config;
use genesis3_conformance::presentation::factory;

use crate::ui::context::UiContext;
use crate::ui::report::{render_validation, ValidationIssue};

/// Load every suite (structural checks run while loading) and plan the
/// dependencies of every scenario without invoking the generator.
pub fn cmd_validate(suites: &[PathBuf], config: &Config, ui: &UiContext) -> Result<i32> {
    let paths = factory::resolve_suite_paths(suites, config);
    let registry = factory::load_registry(&paths)?;
    let pipeline = config.runner_options().pipeline;

    let issues: Vec<ValidationIssue> = registry
        .scenarios()
        .filter_map(|(suite, scenario)| {
            plan_dependencies(&registry, &pipeline, suite, scenario)
                .err()
                .map(|e| ValidationIssue {
                    module_id: suite.module_id.clone(),
                    scenario: scenario.name.clone(),
                    message: e.to_string(),
                })
        })
        .collect();

    if ui.json {
        for issue in &issues {
            crate::ui::json::emit(serde_json::json!({
                "event": "issue",
                "command": "validate",
                "module_id": issue.module_id,
                "scenario": issue.scenario,
                "message": issue.message,
            }))?;
        }
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "validate",
            "status": if issues.is_empty() { "success" } else { "failure" },
            "suites": registry.len(),
            "scenarios": registry.scenarios().count(),
            "issues": issues.len(),
        }))?;
    } else {
        print!(
            "{}",
            render_validation(&registry, &issues, ui.color, ui.unicode)
        );
    }

    Ok(if issues.is_empty() { 0 } else { 1 })
}
