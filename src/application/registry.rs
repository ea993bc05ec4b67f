//! Scenario Registry
//!
//! Every loaded suite, indexed by module id. Also serves as the module
//! graph the dependency resolver walks.

use std::collections::HashMap;

use crate::domain::entities::{ModuleTestSuite, Scenario};
use crate::domain::services::ModuleGraph;
use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    suites: Vec<ModuleTestSuite>,
    index: HashMap<String, usize>,
}

impl ScenarioRegistry {
    /// Build a registry; module ids must be unique across suites
    pub fn new(suites: Vec<ModuleTestSuite>) -> HarnessResult<Self> {
        let mut index = HashMap::with_capacity(suites.len());
        for (position, suite) in suites.iter().enumerate() {
            if index.insert(suite.module_id.clone(), position).is_some() {
                return Err(HarnessError::DuplicateModule {
                    module_id: suite.module_id.clone(),
                });
            }
        }
        Ok(Self { suites, index })
    }

    /// Suites in load order
    pub fn suites(&self) -> &[ModuleTestSuite] {
        &self.suites
    }

    pub fn suite(&self, module_id: &str) -> Option<&ModuleTestSuite> {
        self.index.get(module_id).map(|&i| &self.suites[i])
    }

    pub fn scenario(&self, module_id: &str, name: &str) -> Option<&Scenario> {
        self.suite(module_id).and_then(|s| s.scenario(name))
    }

    /// Every `(suite, scenario)` pair in declaration order
    pub fn scenarios(&self) -> impl Iterator<Item = (&ModuleTestSuite, &Scenario)> {
        self.suites
            .iter()
            .flat_map(|suite| suite.scenarios.iter().map(move |s| (suite, s)))
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.suites.iter().map(|s| s.module_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl ModuleGraph for ScenarioRegistry {
    fn contains_module(&self, module_id: &str) -> bool {
        self.index.contains_key(module_id)
    }

    fn dependencies_of(&self, module_id: &str) -> Option<&[String]> {
        self.suite(module_id).map(ModuleTestSuite::default_dependencies)
    }
}
