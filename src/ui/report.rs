//! Human-readable rendering of run reports, suite listings and validation
//! results. Every function returns a `String` so output can be snapshotted.

use std::fmt::Write;

use genesis3_conformance::application::ScenarioRegistry;
use genesis3_conformance::domain::entities::{
    RunReport, ScenarioResult, ScenarioStatus, SuiteReport,
};

use crate::ui::theme::{colors, paint, Icon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub unicode: bool,
    /// Failures shown per scenario before "... and N more"
    pub max_failures: usize,
}

pub fn render_run_report(report: &RunReport, options: RenderOptions) -> String {
    let mut out = String::new();

    for suite in &report.suites {
        render_suite(&mut out, suite, options);
        out.push('\n');
    }

    let icon = if report.is_success() {
        Icon::Success
    } else {
        Icon::Error
    };
    let mut parts = vec![
        format!("{} passed", report.passed()),
        format!("{} failed", report.failed()),
        format!("{} errored", report.errored()),
    ];
    if report.incomplete() > 0 {
        parts.push(format!("{} not run", report.incomplete()));
    }
    let _ = writeln!(
        out,
        "{} {}  {}",
        icon.colored(options.color, options.unicode),
        parts.join(", "),
        paint(
            &format!("({})", format_ms(report.duration_ms())),
            colors::DIM,
            options.color
        )
    );

    if report.cancelled {
        let _ = writeln!(
            out,
            "{}",
            paint(
                &format!(
                    "Run cancelled; {} scenario(s) did not run",
                    report.incomplete()
                ),
                colors::WARNING,
                options.color
            )
        );
    }

    out
}

fn render_suite(out: &mut String, suite: &SuiteReport, options: RenderOptions) {
    let _ = writeln!(
        out,
        "{}  {}",
        paint(&suite.module_id, colors::INFO, options.color),
        suite.module_name
    );

    for result in &suite.results {
        render_result(out, result, options);
    }

    for scenario in &suite.incomplete {
        let _ = writeln!(
            out,
            "  {} {}  {}",
            Icon::Pending.colored(options.color, options.unicode),
            scenario,
            paint("not run", colors::DIM, options.color)
        );
    }
}

fn render_result(out: &mut String, result: &ScenarioResult, options: RenderOptions) {
    let icon = match result.status {
        ScenarioStatus::Passed => Icon::Success,
        ScenarioStatus::Failed => Icon::Error,
        ScenarioStatus::Errored => Icon::Warning,
    };
    let _ = writeln!(
        out,
        "  {} {}  {}",
        icon.colored(options.color, options.unicode),
        result.scenario,
        paint(&format_ms(result.duration_ms), colors::DIM, options.color)
    );

    let shown = options.max_failures.max(1);
    for failure in result.failures.iter().take(shown) {
        let _ = writeln!(out, "      {}", failure);
    }
    if result.failures.len() > shown {
        let _ = writeln!(
            out,
            "      {}",
            paint(
                &format!("... and {} more", result.failures.len() - shown),
                colors::DIM,
                options.color
            )
        );
    }

    if let Some(workspace) = &result.workspace {
        let _ = writeln!(
            out,
            "      {} workspace: {}",
            Icon::Arrow.colored(options.color, options.unicode),
            workspace.display()
        );
    }
}

/// Modules and their scenarios, in load order
pub fn render_suite_list(registry: &ScenarioRegistry, color: bool) -> String {
    let mut out = String::new();
    for suite in registry.suites() {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            paint(&suite.module_id, colors::INFO, color),
            suite.module_name,
            paint(
                &format!("({} scenarios)", suite.scenarios.len()),
                colors::DIM,
                color
            )
        );
        for scenario in &suite.scenarios {
            let mut line = format!(
                "  {}  [{}]",
                scenario.name,
                scenario.config.providers.join(", ")
            );
            if !scenario.dependencies.is_empty() {
                let _ = write!(line, "  depends on: {}", scenario.dependencies.join(", "));
            }
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

/// A scenario whose dependencies cannot be planned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub module_id: String,
    pub scenario: String,
    pub message: String,
}

pub fn render_validation(
    registry: &ScenarioRegistry,
    issues: &[ValidationIssue],
    color: bool,
    unicode: bool,
) -> String {
    let mut out = String::new();
    for suite in registry.suites() {
        let suite_issues: Vec<&ValidationIssue> = issues
            .iter()
            .filter(|i| i.module_id == suite.module_id)
            .collect();
        let icon = if suite_issues.is_empty() {
            Icon::Success
        } else {
            Icon::Error
        };
        let _ = writeln!(
            out,
            "{} {}  {} scenario(s)",
            icon.colored(color, unicode),
            suite.module_id,
            suite.scenarios.len()
        );
        for issue in suite_issues {
            let _ = writeln!(
                out,
                "    {} {}: {}",
                Icon::Arrow.colored(color, unicode),
                issue.scenario,
                issue.message
            );
        }
    }

    let scenarios: usize = registry.suites().iter().map(|s| s.scenarios.len()).sum();
    let _ = writeln!(
        out,
        "\n{} suite(s), {} scenario(s), {} issue(s)",
        registry.len(),
        scenarios,
        issues.len()
    );
    out
}

fn format_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{} ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1_000.0)
    }
}
