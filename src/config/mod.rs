//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GENESIS3_*)
//! 3. Project config (./conformance.toml)
//! 4. User config (<config dir>/genesis3/conformance.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Project and user files are not merged: the first one found is used.

mod env_validator;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use env_validator::{parse_bool, EnvVarValidator};
pub use loader::{config_candidates, CONFIG_FILE_NAME};
pub use types::{Config, GeneratorConfig, LoadedConfig, ReportConfig, RunConfig, SuitesConfig};
