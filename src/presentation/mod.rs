//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the runner with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates registry, generator and runner (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use genesis3_conformance::presentation::factory;
//!
//! let registry = factory::load_registry(&paths)?;
//! let generator = factory::create_generator(&config);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, RetainWhen};
