use genesis3_conformance::HarnessError;

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::theme::{colors, paint, Icon};

/// Error text plus a hint for the errors users can fix themselves
fn format_harness_error(err: &HarnessError, color: bool, unicode: bool) -> String {
    let icon = Icon::Error.colored(color, unicode);
    let mut out = match err {
        HarnessError::InvalidSuite { file, violations } => {
            let mut s = format!("{} invalid suite {}\n", icon, file.display());
            for violation in violations {
                s.push_str(&format!(
                    "    {} {}\n",
                    Icon::Arrow.colored(color, unicode),
                    violation
                ));
            }
            s
        }
        other => format!("{} {}\n", icon, other),
    };

    let hint = match err {
        HarnessError::SuiteNotFound { .. } => {
            Some("Pass suite files or directories, or set [suites] paths in conformance.toml.")
        }
        HarnessError::InvalidConfig { .. } => {
            Some("Fix the TOML syntax or the value types and try again.")
        }
        HarnessError::DuplicateModule { .. } => {
            Some("Each moduleId may be defined by one suite file only.")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        out.push_str(&format!("  {}\n", paint(hint, colors::DIM, color)));
    }
    out
}

pub fn format_error(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    if let Some(harness) = err.downcast_ref::<HarnessError>() {
        return format_harness_error(harness, color, unicode);
    }

    format!("{} {:#}\n", Icon::Error.colored(color, unicode), err)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &format!("{:#}", err),
                None,
                None,
                Some("genesis3-conformance"),
            )
        );
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
