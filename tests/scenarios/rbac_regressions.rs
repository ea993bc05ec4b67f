//! Scenario: A regressing engine is caught with precise failures
//!
//! Journey: an engine change drops a file, loses a line, or starts
//! rejecting configs. The run must name exactly what broke.
//!
//! Success Criteria:
//! - Missing files and substrings are reported per scenario, in order
//! - Unaffected scenarios still pass
//! - Engine errors end a scenario as errored, attributed to the right module
//! - Failing workspaces are retained for inspection
//! - Running the same engine twice gives the same verdicts

use std::sync::Arc;

use genesis3_conformance::application::{RunSelection, RunnerOptions, ScenarioRunner};
use genesis3_conformance::domain::entities::{Failure, RunReport, ScenarioResult, ScenarioStatus};
use tempfile::TempDir;

use crate::common::*;
use crate::assert_failures;

const USER_RSP: &str = "backend/src/main/java/com/example/model/rsp/UserRsp.java";
const VIEWS: &str = "backend/app_rbac/views.py";
const MIGRATION: &str = "backend/app_rbac/migrations/0001_initial.py";

fn run_with(generator: ReferenceGenerator, workspaces: &TempDir) -> RunReport {
    run_shared(Arc::new(generator), workspaces)
}

fn run_shared(generator: Arc<ReferenceGenerator>, workspaces: &TempDir) -> RunReport {
    let registry = load_repo_registry();
    let mut options = RunnerOptions::default().with_concurrency(2);
    options.pipeline.workspace_root = Some(workspaces.path().to_path_buf());
    ScenarioRunner::new(registry, generator, options).run(&RunSelection::all())
}

fn result<'a>(report: &'a RunReport, scenario: &str) -> &'a ScenarioResult {
    report
        .suite("extension-rbac")
        .and_then(|s| s.result(scenario))
        .unwrap_or_else(|| panic!("no result for {}", scenario))
}

/// SCENARIO: a dropped response DTO fails both scenarios that expect it
#[test]
fn scenario_missing_file_fails_every_scenario_expecting_it() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator = ReferenceGenerator::from_registry(&registry).omitting(USER_RSP);

    let report = run_with(generator, &workspaces);

    let complete = result(&report, "rbac-spring-boot-complete");
    assert_eq!(complete.status, ScenarioStatus::Failed);
    assert_failures!(complete, [Failure::missing_file(USER_RSP)]);

    let profile = result(&report, "rbac-user-profile-response-format");
    assert_failures!(profile, [Failure::missing_file(USER_RSP)]);

    assert_eq!(result(&report, "rbac-django-complete").status, ScenarioStatus::Passed);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.passed(), 4);
    assert_eq!(report.exit_code(), 1);
}

/// SCENARIO: a lost line is reported against its file
#[test]
fn scenario_missing_substring_names_file_and_text() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator =
        ReferenceGenerator::from_registry(&registry).stripping(VIEWS, "get_object_or_404");

    let report = run_with(generator, &workspaces);

    let django = result(&report, "rbac-django-complete");
    assert_failures!(django, [Failure::missing_substring(VIEWS, "get_object_or_404")]);
    assert_eq!(
        result(&report, "rbac-user-profile-response-format").status,
        ScenarioStatus::Passed,
        "the profile scenario only checks that views.py exists"
    );
}

/// SCENARIO: the Django migration loses its model definition
#[test]
fn scenario_django_migration_without_create_model_fails_alone() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator =
        ReferenceGenerator::from_registry(&registry).stripping(MIGRATION, "migrations.CreateModel");

    let report = run_with(generator, &workspaces);

    let django = result(&report, "rbac-django-complete");
    assert_eq!(django.status, ScenarioStatus::Failed);
    assert_failures!(
        django,
        [Failure::missing_substring(MIGRATION, "migrations.CreateModel")]
    );
    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), 5);
}

/// SCENARIO: a second run of the same engine reaches the same verdicts
#[test]
fn scenario_repeated_runs_agree() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator = Arc::new(
        ReferenceGenerator::from_registry(&registry)
            .omitting(USER_RSP)
            .stripping(VIEWS, "get_object_or_404"),
    );

    let first = run_shared(Arc::clone(&generator), &workspaces);
    let second = run_shared(generator, &workspaces);

    let verdicts = |report: &RunReport| -> Vec<_> {
        report
            .suites
            .iter()
            .flat_map(|s| &s.results)
            .map(|r| (r.scenario.clone(), r.status, r.failures.clone(), r.tree_digest.clone()))
            .collect()
    };
    assert_eq!(verdicts(&first), verdicts(&second));
    assert_eq!(first.failed(), 3);
}

/// SCENARIO: failing workspaces stay on disk with the generated files
#[test]
fn scenario_failing_workspace_is_retained() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator =
        ReferenceGenerator::from_registry(&registry).stripping(VIEWS, "get_object_or_404");

    let report = run_with(generator, &workspaces);

    let django = result(&report, "rbac-django-complete");
    let kept = django.workspace.as_ref().expect("failed workspace must be retained");
    assert!(kept.starts_with(workspaces.path()));
    let views = std::fs::read_to_string(kept.join("providers/drf").join(VIEWS)).unwrap();
    assert!(views.contains("UserProfileView"));
    assert!(kept.join("providers/drf").join(RDBMS_DRF_FILE).exists());

    let passed = result(&report, "rbac-security-endpoints");
    assert!(passed.workspace.is_none());
}

/// SCENARIO: the engine rejects the RBAC module itself
#[test]
fn scenario_rejected_module_errors_every_rbac_scenario() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator = ReferenceGenerator::from_registry(&registry).rejecting("rbac");

    let report = run_with(generator, &workspaces);

    assert_eq!(report.errored(), 6);
    for result in &report.suite("extension-rbac").unwrap().results {
        assert_eq!(result.status, ScenarioStatus::Errored);
        assert!(
            matches!(
                &result.failures[..],
                [Failure::GeneratorError { cause }] if cause.contains("unsupported module type")
            ),
            "{:?}",
            result.failures
        );
    }
}

/// SCENARIO: the engine rejects the dependency; the error names it
#[test]
fn scenario_rejected_dependency_is_attributed_to_it() {
    let registry = load_repo_registry();
    let workspaces = TempDir::new().unwrap();
    let generator = ReferenceGenerator::from_registry(&registry).rejecting("rdbms");

    let report = run_with(generator, &workspaces);

    let schema = result(&report, "rbac-database-schema");
    assert_eq!(schema.status, ScenarioStatus::Errored);
    assert!(
        matches!(
            &schema.failures[..],
            [Failure::GeneratorError { cause }] if cause.contains("dependency 'extension-rdbms'")
        ),
        "{:?}",
        schema.failures
    );
    assert_eq!(report.exit_code(), 1);
}
