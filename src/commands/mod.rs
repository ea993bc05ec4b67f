//! Subcommand implementations
//!
//! Each command returns the process exit code: 0 when everything passed,
//! 1 when scenarios (or validation checks) failed. Errors that stop a
//! command before it can report are returned as `Err` and exit with 2.

pub mod list;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use genesis3_conformance::config::{Config, ConfigWarning, LoadedConfig};

/// Explicit `--config` file, or discovery from the working directory
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let (config, warnings) = Config::load_with_warnings(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        return Ok(LoadedConfig {
            config: config.with_env_overrides(),
            source: Some(path.to_path_buf()),
            warnings,
        });
    }

    let cwd = std::env::current_dir().context("reading the working directory")?;
    Ok(Config::load_or_default(Some(&cwd))?)
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!("⚠ {}", w);
    }
}
