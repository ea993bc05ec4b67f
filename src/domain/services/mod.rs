//! Domain Services
//!
//! Stateless operations over domain entities:
//! - `dependency_resolver` - module materialization order
//! - `verifier` - existence and substring checks over a generated tree
//! - `suite_validator` - structural invariants of suites

mod dependency_resolver;
mod suite_validator;
mod verifier;

pub use dependency_resolver::{DependencyResolver, ModuleGraph, ResolveError};
pub use suite_validator::{is_valid_provider_name, validate_suite, SuiteViolation};
pub use verifier::{verify, verify_scenario};
