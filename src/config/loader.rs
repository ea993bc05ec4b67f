//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ConfigWarning, RetentionPolicy};
use crate::error::{HarnessError, HarnessResult};
use crate::infrastructure::fs::user_config_dir;

use super::env_validator::{levenshtein, parse_bool, EnvVarValidator};
use super::types::{Config, LoadedConfig};

/// Project-level configuration file name
pub const CONFIG_FILE_NAME: &str = "conformance.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HarnessResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HarnessError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Candidate config files, most specific first
pub fn config_candidates(project_root: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(root) = project_root {
        candidates.push(root.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = user_config_dir() {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    candidates
}

/// Load from project config, user config, or defaults.
///
/// The first existing file wins; a file that exists but does not parse is
/// an error rather than a silent fallback.
pub fn load_or_default(project_root: Option<&Path>) -> HarnessResult<LoadedConfig> {
    for candidate in config_candidates(project_root) {
        if candidate.is_file() {
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok(LoadedConfig {
                config: with_env_overrides(config),
                source: Some(candidate),
                warnings,
            });
        }
    }

    Ok(LoadedConfig {
        config: with_env_overrides(Config::default()),
        source: None,
        warnings: Vec::new(),
    })
}

/// Apply environment variable overrides (GENESIS3_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(
        config,
        |name| std::env::var(name).ok(),
        &mut std::io::stderr(),
    )
}

/// Apply overrides read through `lookup`; invalid values are reported to
/// `writer` and leave the setting unchanged
pub(crate) fn apply_env_overrides<L, W>(mut config: Config, lookup: L, writer: &mut W) -> Config
where
    L: Fn(&str) -> Option<String>,
    W: Write,
{
    if let Some(value) = lookup("GENESIS3_CONCURRENCY") {
        let validator = EnvVarValidator::new("GENESIS3_CONCURRENCY", &["<positive integer>"]);
        config.run.concurrency = validator.parse_with_writer(
            &value,
            |v| v.trim().parse::<usize>().ok().filter(|&n| n > 0).map(Some),
            config.run.concurrency,
            writer,
        );
    }

    if let Some(value) = lookup("GENESIS3_TIMEOUT_SECS") {
        config.run.timeout_secs = EnvVarValidator::new("GENESIS3_TIMEOUT_SECS", &["<seconds>"])
            .parse_with_writer(
                &value,
                |v| v.trim().parse::<u64>().ok(),
                config.run.timeout_secs,
                writer,
            );
    }

    if let Some(value) = lookup("GENESIS3_RETAIN_WORKSPACES") {
        config.run.retain_workspaces = EnvVarValidator::new(
            "GENESIS3_RETAIN_WORKSPACES",
            &["never", "on-failure", "always"],
        )
        .parse_with_writer(
            &value,
            |v| v.parse::<RetentionPolicy>().ok(),
            config.run.retain_workspaces,
            writer,
        );
    }

    if let Some(value) = lookup("GENESIS3_TRANSITIVE_DEPS") {
        config.run.transitive_dependencies =
            EnvVarValidator::new("GENESIS3_TRANSITIVE_DEPS", &["true", "false"])
                .parse_with_writer(
                    &value,
                    parse_bool,
                    config.run.transitive_dependencies,
                    writer,
                );
    }

    if let Some(value) = lookup("GENESIS3_CHECK_DETERMINISM") {
        config.run.check_determinism =
            EnvVarValidator::new("GENESIS3_CHECK_DETERMINISM", &["true", "false"])
                .parse_with_writer(&value, parse_bool, config.run.check_determinism, writer);
    }

    if let Some(command) = lookup("GENESIS3_GENERATOR") {
        let command = command.trim();
        if !command.is_empty() {
            config.generator.command = Some(command.to_string());
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "run",
        "concurrency",
        "timeout_secs",
        "transitive_dependencies",
        "retain_workspaces",
        "workspace_root",
        "check_determinism",
        "generator",
        "command",
        "args",
        "env",
        "report",
        "max_failures_shown",
        "suites",
        "paths",
        "overrides",
        "moduleId",
        "kind",
        "type",
        "providers",
        "enabled",
        "fieldValues",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
