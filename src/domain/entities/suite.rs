//! Suite entities - module test suites and their scenarios
//!
//! Field names follow the camelCase keys of the Genesis3 module test
//! definitions (`moduleId`, `expectedFiles`, `fileContentChecks`, ...).

use serde::{Deserialize, Serialize};

use super::ModuleConfig;

/// Every scenario for one generator module, run and reported together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTestSuite {
    pub module_id: String,
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How this module is materialized when another module depends on it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<ModuleDefaults>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Default materialization of a module used as a dependency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefaults {
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub config: ModuleConfig,
}

/// One test case: a module configuration plus expected output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Module ids that must be materialized first, in declaration order
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub config: ModuleConfig,
    #[serde(default)]
    pub expected_files: Vec<String>,
    #[serde(default)]
    pub file_content_checks: Vec<FileContentCheck>,
}

/// Substrings that must all be present in one generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContentCheck {
    pub file: String,
    #[serde(default)]
    pub contains: Vec<String>,
}

impl FileContentCheck {
    pub fn new<I, S>(file: impl Into<String>, contains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file: file.into(),
            contains: contains.into_iter().map(Into::into).collect(),
        }
    }
}

impl ModuleTestSuite {
    pub fn new(module_id: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            module_name: module_name.into(),
            description: None,
            defaults: None,
            scenarios: Vec::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn with_defaults(mut self, defaults: ModuleDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Dependencies of this module when it is itself a dependency.
    ///
    /// Falls back to the first scenario's declared dependencies.
    pub fn default_dependencies(&self) -> &[String] {
        match (&self.defaults, self.scenarios.first()) {
            (Some(defaults), _) => &defaults.dependencies,
            (None, Some(first)) => &first.dependencies,
            (None, None) => &[],
        }
    }

    /// Configuration used to materialize this module as a dependency.
    ///
    /// Falls back to the first scenario's config.
    pub fn default_config(&self) -> Option<&ModuleConfig> {
        self.defaults
            .as_ref()
            .map(|d| &d.config)
            .or_else(|| self.scenarios.first().map(|s| &s.config))
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, config: ModuleConfig) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            dependencies: Vec::new(),
            config,
            expected_files: Vec::new(),
            file_content_checks: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, module_id: impl Into<String>) -> Self {
        self.dependencies.push(module_id.into());
        self
    }

    pub fn with_expected_file(mut self, path: impl Into<String>) -> Self {
        self.expected_files.push(path.into());
        self
    }

    pub fn with_check(mut self, check: FileContentCheck) -> Self {
        self.file_content_checks.push(check);
        self
    }
}
