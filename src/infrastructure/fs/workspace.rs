//! Scenario workspace
//!
//! Every scenario gets a private temporary directory. Providers write into
//! `providers/<name>/`; request files and captured stderr go to `requests/`.
//! The directory is deleted on drop unless it is retained.

use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::error::{HarnessError, HarnessResult};

const PROVIDERS_DIR: &str = "providers";
const SCRATCH_DIR: &str = "requests";

/// Isolated filesystem area for one scenario run
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    materialized: Vec<String>,
}

impl Workspace {
    /// Create a workspace under `root` (or the system temp dir).
    ///
    /// `label` becomes part of the directory name so retained workspaces
    /// can be told apart.
    pub fn create(root: Option<&Path>, label: &str) -> HarnessResult<Self> {
        let prefix = format!("genesis3-{}-", sanitize_label(label));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        std::fs::create_dir_all(dir.path().join(SCRATCH_DIR))?;

        Ok(Self {
            dir,
            materialized: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Output directory shared by every module generated for `provider`
    pub fn provider_dir(&self, provider: &str) -> PathBuf {
        self.root().join(PROVIDERS_DIR).join(provider)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root().join(SCRATCH_DIR)
    }

    /// Write one generated file below the provider directory.
    ///
    /// `relative` must stay inside the provider directory.
    pub fn write_file(
        &self,
        provider: &str,
        relative: &Path,
        content: &str,
    ) -> HarnessResult<PathBuf> {
        let base = self.provider_dir(provider);
        if !is_contained(relative) {
            return Err(HarnessError::PathEscape {
                path: relative.to_path_buf(),
                root: base,
            });
        }

        let target = base.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, content)?;
        Ok(target)
    }

    /// Record that `module_id` has been generated into this workspace
    pub fn record_materialized(&mut self, module_id: impl Into<String>) {
        self.materialized.push(module_id.into());
    }

    pub fn is_materialized(&self, module_id: &str) -> bool {
        self.materialized.iter().any(|m| m == module_id)
    }

    /// Modules in the order they were generated
    pub fn materialized(&self) -> &[String] {
        &self.materialized
    }

    /// Keep the directory on disk and return its path
    pub fn retain(self) -> PathBuf {
        self.dir.keep()
    }
}

/// True when `path` is relative and never climbs above its base
pub(crate) fn is_contained(path: &Path) -> bool {
    let mut depth: usize = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    depth > 0
}

fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(48)
        .collect();
    if cleaned.is_empty() {
        "scenario".to_string()
    } else {
        cleaned
    }
}
