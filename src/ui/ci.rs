use genesis3_conformance::domain::entities::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Warning,
    Error,
}

pub fn github_actions_annotation(
    level: AnnotationLevel,
    message: &str,
    file: Option<&str>,
    line: Option<usize>,
    title: Option<&str>,
) -> String {
    let level_str = match level {
        AnnotationLevel::Warning => "warning",
        AnnotationLevel::Error => "error",
    };

    let mut props = Vec::new();
    if let Some(file) = file {
        props.push(format!("file={}", escape_workflow_command_value(file)));
    }
    if let Some(line) = line {
        props.push(format!("line={}", line));
    }
    if let Some(title) = title {
        props.push(format!("title={}", escape_workflow_command_value(title)));
    }

    let prop_str = if props.is_empty() {
        String::new()
    } else {
        format!(" {}", props.join(","))
    };

    format!(
        "::{}{}::{}",
        level_str,
        prop_str,
        escape_workflow_command_message(message)
    )
}

/// One `::error` line per scenario that did not pass
pub fn scenario_annotations(report: &RunReport) -> Vec<String> {
    report
        .suites
        .iter()
        .flat_map(|suite| suite.failing())
        .map(|result| {
            let message = result
                .failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            let title = format!("{}/{}", result.module_id, result.scenario);
            github_actions_annotation(AnnotationLevel::Error, &message, None, None, Some(&title))
        })
        .collect()
}

fn escape_workflow_command_value(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_workflow_command_message(s: &str) -> String {
    escape_workflow_command_value(s)
}
