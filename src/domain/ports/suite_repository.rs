//! Suite repository port - where module test suites come from

use crate::domain::entities::ModuleTestSuite;
use crate::error::HarnessResult;

/// Source of module test suites
pub trait SuiteRepository {
    /// Load every suite, validated, in a stable order
    fn load_all(&self) -> HarnessResult<Vec<ModuleTestSuite>>;
}
