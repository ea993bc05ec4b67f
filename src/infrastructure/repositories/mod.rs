//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod suite_files;

pub use suite_files::{load_suite_file, FsSuiteRepository, SUITE_EXTENSIONS};
