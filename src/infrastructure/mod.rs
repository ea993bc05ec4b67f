//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Scenario workspaces and config directory lookup
//! - `generator/` - Generator implementations (external process)
//! - `repositories/` - Suite file loading (YAML, JSON, TOML)
//! - `events/` - Run event sinks (NDJSON, console)

pub mod events;
pub mod fs;
pub mod generator;
pub mod repositories;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::Workspace;
pub use generator::ProcessGenerator;
pub use repositories::FsSuiteRepository;
