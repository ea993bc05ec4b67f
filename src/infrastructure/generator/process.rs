//! External Process Generator
//!
//! Runs the Genesis3 engine as a child process, once per provider.
//!
//! Protocol:
//! - the module config is written as JSON to a request file in the scratch dir
//! - the command runs with its configured args plus `GENESIS3_CONFIG`,
//!   `GENESIS3_PROVIDER`, `GENESIS3_MODULE_ID` and `GENESIS3_OUTPUT_DIR`
//! - exit 0 is success, exit 2 is a rejected config, anything else failed
//! - files created or changed under the output dir form the result
//! - the child is killed on its own timeout or when the scenario is
//!   interrupted

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::domain::ports::{GeneratedFiles, GenerationRequest, Generator, GeneratorError};
use crate::domain::value_objects::format_duration;

/// Exit code the engine uses for configuration errors
pub const EXIT_REJECTED: i32 = 2;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const STDERR_LIMIT: usize = 4096;

/// Generator backed by an external command
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    program: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl ProcessGenerator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            timeout: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Kill the child if a single call runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn run_child(
        &self,
        request: &GenerationRequest<'_>,
        request_file: &Path,
        stderr_file: &Path,
    ) -> Result<i32, GeneratorError> {
        let stderr = std::fs::File::create(stderr_file).map_err(|e| {
            GeneratorError::Internal(format!("cannot create {}: {}", stderr_file.display(), e))
        })?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(&self.env)
            .env("GENESIS3_CONFIG", request_file)
            .env("GENESIS3_PROVIDER", request.provider)
            .env("GENESIS3_MODULE_ID", &request.config.module_id)
            .env("GENESIS3_OUTPUT_DIR", request.output_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr));

        let mut child = cmd.spawn().map_err(|e| {
            GeneratorError::Internal(format!("failed to start {}: {}", self.program.display(), e))
        })?;

        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status.code().unwrap_or(-1)),
                Ok(None) => {}
                Err(e) => {
                    return Err(GeneratorError::Internal(format!(
                        "failed to wait for generator: {}",
                        e
                    )))
                }
            }

            let stop = match self.timeout {
                Some(timeout) if started.elapsed() >= timeout => {
                    Some(format!("generator timed out after {}", format_duration(timeout)))
                }
                _ => request
                    .interrupt
                    .check()
                    .map(|reason| format!("generator stopped: {}", reason.as_str())),
            };
            if let Some(cause) = stop {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GeneratorError::Internal(cause));
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Generator for ProcessGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<GeneratedFiles, GeneratorError> {
        std::fs::create_dir_all(request.output_dir).map_err(|e| {
            GeneratorError::Internal(format!(
                "cannot create {}: {}",
                request.output_dir.display(),
                e
            ))
        })?;

        let stem = format!(
            "{}-{}",
            file_stem(&request.config.module_id),
            file_stem(request.provider)
        );
        let request_file = request.scratch_dir.join(format!("{}.json", stem));
        let stderr_file = request.scratch_dir.join(format!("{}.stderr", stem));

        let body = serde_json::to_vec_pretty(request.config)
            .map_err(|e| GeneratorError::Internal(format!("cannot encode request: {}", e)))?;
        std::fs::write(&request_file, body).map_err(|e| {
            GeneratorError::Internal(format!("cannot write {}: {}", request_file.display(), e))
        })?;

        let before = snapshot(request.output_dir)?;
        let code = self.run_child(request, &request_file, &stderr_file)?;

        if code != 0 {
            let stderr = read_stderr(&stderr_file);
            let message = if stderr.is_empty() {
                format!("exit code {}", code)
            } else {
                format!("exit code {}: {}", code, stderr)
            };
            return Err(if code == EXIT_REJECTED {
                GeneratorError::Rejected(message)
            } else {
                GeneratorError::Internal(message)
            });
        }

        let mut after = snapshot(request.output_dir)?;
        after.retain(|path, content| before.get(path) != Some(content));
        Ok(after)
    }
}

/// Every file under `root`, keyed by relative path
fn snapshot(root: &Path) -> Result<GeneratedFiles, GeneratorError> {
    let mut files = GeneratedFiles::new();
    if !root.exists() {
        return Ok(files);
    }

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for entry in walker {
        let entry =
            entry.map_err(|e| GeneratorError::Internal(format!("cannot walk output: {}", e)))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .map_err(|e| GeneratorError::Internal(e.to_string()))?
            .to_path_buf();
        let bytes = std::fs::read(path).map_err(|e| {
            GeneratorError::Internal(format!("cannot read {}: {}", path.display(), e))
        })?;
        files.insert(relative, String::from_utf8_lossy(&bytes).into_owned());
    }

    Ok(files)
}

fn read_stderr(path: &Path) -> String {
    let raw = std::fs::read(path).unwrap_or_default();
    let text = String::from_utf8_lossy(&raw);
    let trimmed = text.trim();
    if trimmed.len() <= STDERR_LIMIT {
        return trimmed.to_string();
    }
    let mut end = STDERR_LIMIT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
