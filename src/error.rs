//! Error types for the conformance harness
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::TreeConflict;
use crate::domain::ports::GeneratorError;
use crate::domain::services::{ResolveError, SuiteViolation};
use crate::domain::value_objects::InterruptReason;

/// Result type alias for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Main error type for harness operations
#[derive(Error, Debug)]
pub enum HarnessError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Suite file could not be parsed
    #[error("failed to parse suite {file}: {message}")]
    SuiteParse { file: PathBuf, message: String },

    /// Suite file has an extension we don't read
    #[error("unsupported suite format: {file} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedSuiteFormat { file: PathBuf },

    /// Suite parsed but breaks structural invariants
    #[error("invalid suite {file}: {}", join_violations(.violations))]
    InvalidSuite {
        file: PathBuf,
        violations: Vec<SuiteViolation>,
    },

    /// Suite path does not exist
    #[error("suite path not found: {path}")]
    SuiteNotFound { path: PathBuf },

    /// Two suites claim the same module id
    #[error("module '{module_id}' is defined by more than one suite")]
    DuplicateModule { module_id: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Dependency resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A dependency module has nothing to materialize it with
    #[error("module '{module_id}' has no default configuration to materialize it with")]
    NoDefaultConfig { module_id: String },

    /// A module was about to be generated before one of its prerequisites
    #[error("module '{module_id}' generated before its dependency '{missing}'")]
    OrderViolation { module_id: String, missing: String },

    /// Generator rejected the config or failed
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Two providers wrote the same path differently
    #[error(transparent)]
    TreeConflict(#[from] TreeConflict),

    /// Config lists no providers
    #[error("module '{module_id}' lists no providers")]
    NoProviders { module_id: String },

    /// Provider name cannot be used as a directory
    #[error("invalid provider name '{provider}'")]
    InvalidProvider { provider: String },

    /// Generated path escapes the workspace
    #[error("path '{path}' escapes workspace '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// The scenario was cancelled or ran past its deadline
    #[error("scenario interrupted: {}", .reason.as_str())]
    Interrupted { reason: InterruptReason },
}

impl HarnessError {
    /// Errors caused by module dependencies rather than generation
    pub fn is_dependency_error(&self) -> bool {
        matches!(
            self,
            HarnessError::Resolve(_)
                | HarnessError::NoDefaultConfig { .. }
                | HarnessError::OrderViolation { .. }
        )
    }
}

fn join_violations(violations: &[SuiteViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
