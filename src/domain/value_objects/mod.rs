//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod hash;
mod interrupt;
mod retention;

pub use config_warning::ConfigWarning;
pub use hash::TreeDigest;
pub use interrupt::{format_duration, Interrupt, InterruptReason};
pub use retention::RetentionPolicy;
