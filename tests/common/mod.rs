//! Common test utilities for scenario, property and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and user config directories for CLI runs
//! - Assertion macros: `assert_exit_code!`, `assert_failures!`
//! - Fixtures: Suites, engine scripts and `ReferenceGenerator`

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
