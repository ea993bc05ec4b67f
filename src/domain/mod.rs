//! Domain Layer
//!
//! The harness's core logic, free of process and file-system concerns.
//!
//! ## Structure
//!
//! - `entities/` - Suites, configs, generated trees, results, reports
//! - `value_objects/` - Immutable value types (TreeDigest, RetentionPolicy)
//! - `services/` - Resolver, verifier, suite validator
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
