use std::path::PathBuf;

use anyhow::Result;
use genesis3_conformance::config::Config;
use genesis3_conformance::presentation::factory;

use crate::ui::context::UiContext;

pub fn cmd_list(suites: &[PathBuf], config: &Config, ui: &UiContext) -> Result<i32> {
    let paths = factory::resolve_suite_paths(suites, config);
    let registry = factory::load_registry(&paths)?;

    if ui.json {
        for (suite, scenario) in registry.scenarios() {
            crate::ui::json::emit(serde_json::json!({
                "event": "scenario",
                "command": "list",
                "module_id": suite.module_id,
                "module_name": suite.module_name,
                "scenario": scenario.name,
                "providers": scenario.config.providers,
                "dependencies": scenario.dependencies,
            }))?;
        }
        return Ok(0);
    }

    print!(
        "{}",
        crate::ui::report::render_suite_list(&registry, ui.color)
    );
    Ok(0)
}
