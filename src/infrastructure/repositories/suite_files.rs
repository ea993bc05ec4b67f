//! File System Suite Repository
//!
//! Loads module test suites from YAML, JSON or TOML files. A directory
//! loads every suite file directly inside it, sorted by file name.

use std::path::{Path, PathBuf};

use crate::domain::entities::ModuleTestSuite;
use crate::domain::ports::SuiteRepository;
use crate::domain::services::validate_suite;
use crate::error::{HarnessError, HarnessResult};

/// File extensions recognised as suite files
pub const SUITE_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "toml"];

/// Suite repository reading from files and directories
#[derive(Debug, Clone, Default)]
pub struct FsSuiteRepository {
    paths: Vec<PathBuf>,
}

impl FsSuiteRepository {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Expand directories into their suite files, keeping argument order
    pub fn discover(&self) -> HarnessResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                let mut found: Vec<PathBuf> = std::fs::read_dir(path)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && has_suite_extension(p))
                    .collect();
                found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
                files.extend(found);
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                return Err(HarnessError::SuiteNotFound { path: path.clone() });
            }
        }
        Ok(files)
    }
}

impl SuiteRepository for FsSuiteRepository {
    fn load_all(&self) -> HarnessResult<Vec<ModuleTestSuite>> {
        self.discover()?
            .iter()
            .map(|file| load_suite_file(file))
            .collect()
    }
}

/// Parse and validate a single suite file
pub fn load_suite_file(path: &Path) -> HarnessResult<ModuleTestSuite> {
    let content = std::fs::read_to_string(path)?;
    let suite = parse_suite(path, &content)?;

    let violations = validate_suite(&suite);
    if !violations.is_empty() {
        return Err(HarnessError::InvalidSuite {
            file: path.to_path_buf(),
            violations,
        });
    }

    Ok(suite)
}

fn parse_suite(path: &Path, content: &str) -> HarnessResult<ModuleTestSuite> {
    let parse_error = |message: String| HarnessError::SuiteParse {
        file: path.to_path_buf(),
        message,
    };

    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml_ng::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        Some("json") => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Some("toml") => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        _ => Err(HarnessError::UnsupportedSuiteFormat {
            file: path.to_path_buf(),
        }),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn has_suite_extension(path: &Path) -> bool {
    extension(path).is_some_and(|e| SUITE_EXTENSIONS.contains(&e.as_str()))
}
