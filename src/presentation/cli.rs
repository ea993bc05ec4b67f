//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - Suite paths default to `[suites] paths` from the config, then `./suites`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::RetentionPolicy;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// When to keep scenario workspaces on disk
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetainWhen {
    Never,
    OnFailure,
    Always,
}

impl From<RetainWhen> for RetentionPolicy {
    fn from(value: RetainWhen) -> Self {
        match value {
            RetainWhen::Never => RetentionPolicy::Never,
            RetainWhen::OnFailure => RetentionPolicy::OnFailure,
            RetainWhen::Always => RetentionPolicy::Always,
        }
    }
}

/// genesis3-conformance - scenario-driven conformance harness for Genesis3 modules
#[derive(Parser, Debug)]
#[command(name = "genesis3-conformance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./conformance.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the generator
    Run {
        /// Suite files or directories
        #[arg(value_name = "SUITES")]
        suites: Vec<PathBuf>,

        /// Only run these modules (can be specified multiple times)
        #[arg(short, long = "module", value_name = "MODULE_ID")]
        modules: Vec<String>,

        /// Only run scenarios with this name
        #[arg(short, long)]
        scenario: Option<String>,

        /// Scenarios in flight at once
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// Per-scenario timeout in seconds (0 disables it)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// When to keep scenario workspaces
        #[arg(long, value_enum)]
        retain: Option<RetainWhen>,

        /// Parent directory for scenario workspaces
        #[arg(long, value_name = "DIR")]
        workspace_root: Option<PathBuf>,

        /// Generator executable
        #[arg(short, long, value_name = "PROGRAM")]
        generator: Option<String>,

        /// Generate every scenario twice and compare the trees
        #[arg(long)]
        check_determinism: bool,

        /// Only materialize directly declared dependencies
        #[arg(long)]
        no_transitive: bool,
    },

    /// List modules and scenarios
    List {
        /// Suite files or directories
        #[arg(value_name = "SUITES")]
        suites: Vec<PathBuf>,
    },

    /// Load and validate suites without running the generator
    Validate {
        /// Suite files or directories
        #[arg(value_name = "SUITES")]
        suites: Vec<PathBuf>,
    },
}
