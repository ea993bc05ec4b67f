//! Generator port - the external Genesis3 code-generation engine
//!
//! The harness never renders files itself. One call generates one provider
//! of one module config into a dedicated output directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::ModuleConfig;
use crate::domain::value_objects::Interrupt;

/// Files produced by one generator call, keyed by path relative to the
/// output directory
pub type GeneratedFiles = BTreeMap<PathBuf, String>;

/// A single per-provider generator call
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Config forwarded verbatim
    pub config: &'a ModuleConfig,
    /// The provider this call generates (one of `config.providers`)
    pub provider: &'a str,
    /// Where the provider's files go; shared by every module materialized
    /// for the same provider in one workspace
    pub output_dir: &'a Path,
    /// Workspace-private scratch space for request files
    pub scratch_dir: &'a Path,
    /// Deadline and cancellation of the scenario this call belongs to
    pub interrupt: &'a Interrupt,
}

/// Errors reported by a generator
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// The engine refused the configuration; retrying cannot help
    #[error("configuration rejected: {0}")]
    Rejected(String),

    /// The engine failed while generating
    #[error("generation failed: {0}")]
    Internal(String),
}

impl GeneratorError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeneratorError::Internal(_))
    }
}

/// The code-generation engine under test.
///
/// Implementations must be deterministic for identical requests and must
/// not touch anything outside `output_dir` and `scratch_dir`.
pub trait Generator: Send + Sync {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<GeneratedFiles, GeneratorError>;
}
