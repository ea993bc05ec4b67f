//! Scenario: A conforming engine passes every RBAC scenario
//!
//! Journey: CI runs the shipped suites against an engine that produces
//! everything they expect.
//!
//! Success Criteria:
//! - All six RBAC scenarios pass, spring and drf alike
//! - extension-rdbms is generated before the RBAC module in every workspace
//! - Passing workspaces are cleaned up

use std::sync::Arc;

use genesis3_conformance::application::{RunSelection, RunnerOptions, ScenarioRunner};
use genesis3_conformance::domain::entities::ScenarioStatus;
use genesis3_conformance::domain::value_objects::RetentionPolicy;
use tempfile::TempDir;

use crate::common::*;

const RBAC_SCENARIOS: [&str; 6] = [
    "rbac-spring-boot-complete",
    "rbac-django-complete",
    "rbac-user-profile-response-format",
    "rbac-without-jwt",
    "rbac-security-endpoints",
    "rbac-database-schema",
];

fn options(workspaces: &TempDir) -> RunnerOptions {
    let mut options = RunnerOptions::default().with_concurrency(3);
    options.pipeline.workspace_root = Some(workspaces.path().to_path_buf());
    options.pipeline.retention = RetentionPolicy::OnFailure;
    options
}

/// SCENARIO: every shipped RBAC scenario passes against a conforming engine
#[test]
fn scenario_reference_engine_passes_all_rbac_scenarios() {
    let registry = load_repo_registry();
    let generator = Arc::new(ReferenceGenerator::from_registry(&registry));
    let workspaces = TempDir::new().unwrap();

    let runner = ScenarioRunner::new(registry, generator.clone(), options(&workspaces));
    let report = runner.run(&RunSelection::all());

    let rbac = report
        .suite("extension-rbac")
        .expect("extension-rbac must be reported");
    let names: Vec<&str> = rbac.results.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(names, RBAC_SCENARIOS, "results must keep declaration order");

    for result in &rbac.results {
        assert_eq!(
            result.status,
            ScenarioStatus::Passed,
            "{} failed: {:?}",
            result.scenario,
            result.failures
        );
        assert!(result.tree_digest.is_some());
        assert!(result.workspace.is_none());
    }

    assert!(report.is_success());
    assert_eq!(report.passed(), 6);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(
        std::fs::read_dir(workspaces.path()).unwrap().count(),
        0,
        "passing workspaces must be removed"
    );
}

/// SCENARIO: the dependency module is generated first, per provider
#[test]
fn scenario_rdbms_is_materialized_before_rbac() {
    let registry = load_repo_registry();
    let generator = Arc::new(ReferenceGenerator::from_registry(&registry));
    let workspaces = TempDir::new().unwrap();

    let runner = ScenarioRunner::new(
        registry,
        generator.clone(),
        options(&workspaces).with_concurrency(1),
    );
    let report = runner.run(
        &RunSelection::all()
            .with_module("extension-rbac")
            .with_scenario("rbac-user-profile-response-format"),
    );

    assert_eq!(report.passed(), 1);
    assert_eq!(generator.call_order("spring"), ["rdbms", "rbac-profile"]);
    assert_eq!(generator.call_order("drf"), ["rdbms", "rbac-profile"]);
}

/// SCENARIO: one provider per call, in declaration order
#[test]
fn scenario_profile_scenario_fans_out_to_both_backends() {
    let registry = load_repo_registry();
    let generator = Arc::new(ReferenceGenerator::from_registry(&registry));
    let workspaces = TempDir::new().unwrap();

    let runner = ScenarioRunner::new(
        registry,
        generator.clone(),
        options(&workspaces).with_concurrency(1),
    );
    runner.run(&RunSelection::all().with_scenario("rbac-user-profile-response-format"));

    let own_calls: Vec<String> = generator
        .calls()
        .into_iter()
        .filter(|(module_id, _)| module_id == "rbac-profile")
        .map(|(_, provider)| provider)
        .collect();
    assert_eq!(own_calls, ["spring", "drf"]);
}

/// SCENARIO: the same engine yields the same tree every time
#[test]
fn scenario_determinism_check_passes_for_a_stable_engine() {
    let registry = load_repo_registry();
    let generator = Arc::new(ReferenceGenerator::from_registry(&registry));
    let workspaces = TempDir::new().unwrap();

    let mut options = options(&workspaces);
    options.pipeline.check_determinism = true;
    let runner = ScenarioRunner::new(registry, generator, options);
    let report = runner.run(&RunSelection::all().with_scenario("rbac-django-complete"));

    assert_eq!(report.passed(), 1, "{:?}", report.suites);
}
