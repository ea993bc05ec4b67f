//! File System Implementations
//!
//! Scenario workspaces and config directory resolution.

mod config_dir;
mod workspace;

pub use config_dir::{user_config_dir, GENESIS3_TEST_CONFIG_DIR_VAR};
pub use workspace::Workspace;
