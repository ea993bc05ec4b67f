//! Generator Invoker
//!
//! Fans one module config out into one generator call per provider and
//! collects the results into a single tree. Files are also written into
//! the provider's output directory so later modules in the same workspace
//! see them.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{normalize_path, GeneratedFile, GeneratedTree, ModuleConfig};
use crate::domain::ports::{GenerationRequest, Generator};
use crate::domain::services::is_valid_provider_name;
use crate::domain::value_objects::Interrupt;
use crate::error::{HarnessError, HarnessResult};
use crate::infrastructure::fs::Workspace;

#[derive(Clone)]
pub struct GeneratorInvoker {
    generator: Arc<dyn Generator>,
}

impl GeneratorInvoker {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generate `config` into `workspace`, one call per provider in
    /// declaration order.
    ///
    /// The config is forwarded verbatim, including `enabled = false`; the
    /// engine decides what a disabled module emits. The first failing
    /// provider aborts the invocation.
    pub fn invoke(
        &self,
        config: &ModuleConfig,
        workspace: &Workspace,
    ) -> HarnessResult<GeneratedTree> {
        self.invoke_until(config, workspace, &Interrupt::none())
    }

    /// Like [`invoke`](Self::invoke), but stops before the next provider
    /// once `interrupt` trips
    pub fn invoke_until(
        &self,
        config: &ModuleConfig,
        workspace: &Workspace,
        interrupt: &Interrupt,
    ) -> HarnessResult<GeneratedTree> {
        if config.providers.is_empty() {
            return Err(HarnessError::NoProviders {
                module_id: config.module_id.clone(),
            });
        }
        if let Some(bad) = config
            .providers
            .iter()
            .find(|p| !is_valid_provider_name(p))
        {
            return Err(HarnessError::InvalidProvider {
                provider: bad.clone(),
            });
        }

        let mut tree = GeneratedTree::new();
        let scratch_dir = workspace.scratch_dir();
        for provider in &config.providers {
            if let Some(reason) = interrupt.check() {
                return Err(HarnessError::Interrupted { reason });
            }
            let output_dir = workspace.provider_dir(provider);
            std::fs::create_dir_all(&output_dir)?;

            let files = self.generator.generate(&GenerationRequest {
                config,
                provider,
                output_dir: &output_dir,
                scratch_dir: &scratch_dir,
                interrupt,
            })?;

            for (path, content) in files {
                let relative = normalize_path(&relative_to(&path, &output_dir)?.to_string_lossy());
                workspace.write_file(provider, Path::new(&relative), &content)?;
                tree.insert(
                    &relative,
                    GeneratedFile::new(content, &config.module_id, provider),
                )?;
            }
        }

        Ok(tree)
    }
}

/// Generators may report absolute paths inside their output dir
fn relative_to<'a>(path: &'a Path, output_dir: &Path) -> HarnessResult<&'a Path> {
    if path.is_absolute() {
        return path
            .strip_prefix(output_dir)
            .map_err(|_| HarnessError::PathEscape {
                path: path.to_path_buf(),
                root: output_dir.to_path_buf(),
            });
    }
    Ok(path)
}
