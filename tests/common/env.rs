//! Test environment builder for isolated CLI runs.
//!
//! Provides `TestEnv` - a temp project directory (suites, config, engine
//! script) plus a temp user config directory, and helpers to run the
//! `genesis3-conformance` binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, one value per non-empty line
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON ({}): {}\n{}", e, line, self.stdout))
            })
            .collect()
    }

    /// Events whose `event` field equals `name`
    pub fn events_named(&self, name: &str) -> Vec<serde_json::Value> {
        self.json_events()
            .into_iter()
            .filter(|e| e["event"] == name)
            .collect()
    }
}

/// Isolated project and user config directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run the CLI from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run the CLI from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("GENESIS3_TEST_CONFIG_DIR", self.config_dir.path())
            .env_remove("GENESIS3_GENERATOR")
            .env_remove("GENESIS3_CONCURRENCY")
            .env_remove("GENESIS3_TIMEOUT_SECS")
            .env_remove("GENESIS3_RETAIN_WORKSPACES")
            .env_remove("GENESIS3_TRANSITIVE_DEPS")
            .env_remove("GENESIS3_CHECK_DETERMINISM")
            .env_remove("GITHUB_ACTIONS");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute genesis3-conformance");
        to_result(output)
    }

    /// Write a file under the project root
    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for `TestEnv` with fluent API
#[derive(Default)]
pub struct TestEnvBuilder {
    suites: Vec<(String, String)>,
    project_config: Option<String>,
    user_config: Option<String>,
    engine: Option<String>,
    repo_suites: bool,
}

impl TestEnvBuilder {
    /// Add `suites/<file_name>` with `content`
    pub fn with_suite(mut self, file_name: &str, content: &str) -> Self {
        self.suites.push((file_name.to_string(), content.to_string()));
        self
    }

    /// Copy the suites shipped with this repository into `suites/`
    pub fn with_repo_suites(mut self) -> Self {
        self.repo_suites = true;
        self
    }

    /// `conformance.toml` in the project root
    pub fn with_project_config(mut self, content: &str) -> Self {
        self.project_config = Some(content.to_string());
        self
    }

    /// `conformance.toml` in the user config directory
    pub fn with_user_config(mut self, content: &str) -> Self {
        self.user_config = Some(content.to_string());
        self
    }

    /// Shell body written to `engine.sh`, run through `/bin/sh`
    pub fn with_engine(mut self, body: &str) -> Self {
        self.engine = Some(body.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create project dir"),
            config_dir: TempDir::new().expect("Failed to create config dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_genesis3-conformance")),
        };

        if self.repo_suites {
            for entry in std::fs::read_dir(super::repo_suites_dir()).expect("suites/ missing") {
                let path = entry.expect("unreadable suites/ entry").path();
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    let content = std::fs::read_to_string(&path).expect("unreadable suite");
                    env.write_project_file(&format!("suites/{}", name), &content);
                }
            }
        }
        for (name, content) in &self.suites {
            env.write_project_file(&format!("suites/{}", name), content);
        }
        if let Some(config) = &self.project_config {
            env.write_project_file("conformance.toml", config);
        }
        if let Some(config) = &self.user_config {
            write_file(&env.config_dir.path().join("conformance.toml"), config);
        }
        if let Some(engine) = &self.engine {
            env.write_project_file("engine.sh", &format!("{}\n", engine));
        }

        env
    }
}
