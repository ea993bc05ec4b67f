//! Generator Implementations
//!
//! Concrete implementations of the `Generator` port.

mod process;

pub use process::{ProcessGenerator, EXIT_REJECTED};
