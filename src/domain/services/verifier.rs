//! Artifact verifier
//!
//! Checks a generated tree against a scenario's expectations. Purely
//! read-only; every failure is reported, nothing short-circuits.

use crate::domain::entities::{Failure, FileContentCheck, GeneratedTree, Scenario};

/// Verify `tree` against expected paths and content checks.
///
/// Failures come out in a fixed order: missing files (in `expected_files`
/// order), then missing substrings (in check order, then `contains` order).
/// A content check on a file that is not in the tree is skipped; the file
/// itself is reported as missing by the existence pass.
pub fn verify(
    tree: &GeneratedTree,
    expected_files: &[String],
    checks: &[FileContentCheck],
) -> Vec<Failure> {
    let mut failures: Vec<Failure> = expected_files
        .iter()
        .filter(|path| !tree.contains(path))
        .map(|path| Failure::missing_file(path.as_str()))
        .collect();

    for check in checks {
        let Some(content) = tree.content(&check.file) else {
            continue;
        };
        failures.extend(
            check
                .contains
                .iter()
                .filter(|needle| !content.contains(needle.as_str()))
                .map(|needle| Failure::missing_substring(check.file.as_str(), needle.as_str())),
        );
    }

    failures
}

/// [`verify`] with the expectations of `scenario`
pub fn verify_scenario(tree: &GeneratedTree, scenario: &Scenario) -> Vec<Failure> {
    verify(tree, &scenario.expected_files, &scenario.file_content_checks)
}
