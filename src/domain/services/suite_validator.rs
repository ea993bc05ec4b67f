//! Suite validator
//!
//! Structural invariants a suite must satisfy before it is run.

use std::collections::HashSet;

use crate::domain::entities::{normalize_path, ModuleTestSuite};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SuiteViolation {
    #[error("suite has an empty moduleId")]
    EmptyModuleId,

    #[error("scenario #{index} has an empty name")]
    EmptyScenarioName { index: usize },

    #[error("scenario name '{name}' is used more than once")]
    DuplicateScenario { name: String },

    #[error("scenario '{scenario}' checks content of '{file}' which is not in expectedFiles")]
    ContentCheckNotExpected { scenario: String, file: String },

    #[error("scenario '{scenario}' lists '{path}' in expectedFiles more than once")]
    DuplicateExpectedFile { scenario: String, path: String },

    #[error("scenario '{scenario}' has no providers")]
    NoProviders { scenario: String },

    #[error("scenario '{scenario}' lists provider '{provider}' more than once")]
    DuplicateProvider { scenario: String, provider: String },

    #[error("scenario '{scenario}' uses invalid provider name '{provider}'")]
    InvalidProvider { scenario: String, provider: String },

    #[error("scenario '{scenario}' lists dependency '{module_id}' more than once")]
    DuplicateDependency { scenario: String, module_id: String },
}

/// Provider names become directory names inside a workspace
pub fn is_valid_provider_name(provider: &str) -> bool {
    !provider.is_empty()
        && provider
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Collect every violation in `suite`; an empty result means valid
pub fn validate_suite(suite: &ModuleTestSuite) -> Vec<SuiteViolation> {
    let mut violations = Vec::new();

    if suite.module_id.trim().is_empty() {
        violations.push(SuiteViolation::EmptyModuleId);
    }

    let mut names = HashSet::new();
    for (index, scenario) in suite.scenarios.iter().enumerate() {
        if scenario.name.trim().is_empty() {
            violations.push(SuiteViolation::EmptyScenarioName { index });
        } else if !names.insert(scenario.name.as_str()) {
            violations.push(SuiteViolation::DuplicateScenario {
                name: scenario.name.clone(),
            });
        }

        let mut expected = HashSet::new();
        for path in &scenario.expected_files {
            let normalized = normalize_path(path);
            if !expected.insert(normalized) {
                violations.push(SuiteViolation::DuplicateExpectedFile {
                    scenario: scenario.name.clone(),
                    path: path.clone(),
                });
            }
        }

        for check in &scenario.file_content_checks {
            if !expected.contains(&normalize_path(&check.file)) {
                violations.push(SuiteViolation::ContentCheckNotExpected {
                    scenario: scenario.name.clone(),
                    file: check.file.clone(),
                });
            }
        }

        let mut dependencies = HashSet::new();
        for module_id in &scenario.dependencies {
            if !dependencies.insert(module_id.as_str()) {
                violations.push(SuiteViolation::DuplicateDependency {
                    scenario: scenario.name.clone(),
                    module_id: module_id.clone(),
                });
            }
        }

        if scenario.config.providers.is_empty() {
            violations.push(SuiteViolation::NoProviders {
                scenario: scenario.name.clone(),
            });
        }
        let mut providers = HashSet::new();
        for provider in &scenario.config.providers {
            if !is_valid_provider_name(provider) {
                violations.push(SuiteViolation::InvalidProvider {
                    scenario: scenario.name.clone(),
                    provider: provider.clone(),
                });
            } else if !providers.insert(provider.as_str()) {
                violations.push(SuiteViolation::DuplicateProvider {
                    scenario: scenario.name.clone(),
                    provider: provider.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FileContentCheck, ModuleConfig, ModuleKind, Scenario};

    fn config() -> ModuleConfig {
        ModuleConfig::new("rbac-spring", ModuleKind::Extension, "rbac").with_provider("spring")
    }

    fn suite(scenarios: Vec<Scenario>) -> ModuleTestSuite {
        scenarios
            .into_iter()
            .fold(ModuleTestSuite::new("extension-rbac", "RBAC"), |s, sc| {
                s.with_scenario(sc)
            })
    }

    #[test]
    fn valid_suite_has_no_violations() {
        let scenario = Scenario::new("rbac-without-jwt", config())
            .with_dependency("extension-rdbms")
            .with_expected_file("UserEntity.java")
            .with_check(FileContentCheck::new("UserEntity.java", ["email"]));

        assert!(validate_suite(&suite(vec![scenario])).is_empty());
    }

    #[test]
    fn duplicate_scenario_names_are_rejected() {
        let violations = validate_suite(&suite(vec![
            Scenario::new("same", config()),
            Scenario::new("same", config()),
        ]));

        assert_eq!(
            violations,
            vec![SuiteViolation::DuplicateScenario {
                name: "same".to_string()
            }]
        );
    }

    #[test]
    fn content_check_requires_expected_file() {
        let scenario = Scenario::new("s", config())
            .with_check(FileContentCheck::new("SecurityConfig.java", ["permitAll"]));

        let violations = validate_suite(&suite(vec![scenario]));

        assert_eq!(
            violations,
            vec![SuiteViolation::ContentCheckNotExpected {
                scenario: "s".to_string(),
                file: "SecurityConfig.java".to_string()
            }]
        );
    }

    #[test]
    fn content_check_paths_are_normalized() {
        let scenario = Scenario::new("s", config())
            .with_expected_file("./backend/a.py")
            .with_check(FileContentCheck::new("backend/a.py", ["x"]));

        assert!(validate_suite(&suite(vec![scenario])).is_empty());
    }

    #[test]
    fn providers_must_be_present_unique_and_path_safe() {
        let mut no_providers = config();
        no_providers.providers.clear();
        let mut bad = config();
        bad.providers = vec!["spring".into(), "spring".into(), "../drf".into()];

        let violations = validate_suite(&suite(vec![
            Scenario::new("a", no_providers),
            Scenario::new("b", bad),
        ]));

        assert_eq!(violations.len(), 3);
        assert!(matches!(violations[0], SuiteViolation::NoProviders { .. }));
        assert!(matches!(violations[1], SuiteViolation::DuplicateProvider { .. }));
        assert!(matches!(violations[2], SuiteViolation::InvalidProvider { .. }));
    }

    #[test]
    fn empty_module_id_is_rejected() {
        let suite = ModuleTestSuite::new("  ", "Nameless");
        assert_eq!(validate_suite(&suite), vec![SuiteViolation::EmptyModuleId]);
    }

    #[test]
    fn provider_names() {
        assert!(is_valid_provider_name("spring"));
        assert!(is_valid_provider_name("drf_2"));
        assert!(!is_valid_provider_name(""));
        assert!(!is_valid_provider_name("a/b"));
        assert!(!is_valid_provider_name(".."));
    }
}
