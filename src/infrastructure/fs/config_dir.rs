//! User config directory resolution with test isolation support.
//!
//! `dirs::config_dir()` uses platform APIs on macOS and Windows, so setting
//! `XDG_CONFIG_HOME` in tests has no effect there. `user_config_dir()` checks
//! `GENESIS3_TEST_CONFIG_DIR` first and falls back to `dirs::config_dir()`.

use std::path::PathBuf;

/// Environment variable for test isolation of the user config directory.
pub const GENESIS3_TEST_CONFIG_DIR_VAR: &str = "GENESIS3_TEST_CONFIG_DIR";

/// Directory holding the user-level `conformance.toml`
/// (`<config dir>/genesis3`).
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(GENESIS3_TEST_CONFIG_DIR_VAR)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("genesis3")))
}
