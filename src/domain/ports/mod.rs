//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod generator;
pub mod run_events;
pub mod suite_repository;

pub use generator::{GeneratedFiles, GenerationRequest, Generator, GeneratorError};
pub use run_events::{NoopEventSink, RunEvent, RunEventSink};
pub use suite_repository::SuiteRepository;
