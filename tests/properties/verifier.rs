//! Property tests for the artifact verifier.

use std::collections::BTreeMap;

use proptest::prelude::*;

use genesis3_conformance::domain::entities::{
    Failure, FileContentCheck, GeneratedFile, GeneratedTree,
};
use genesis3_conformance::domain::services::verify;

fn relative_path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9_]{1,8}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

fn needle() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z@(){}_ ]{1,12}").unwrap()
}

/// Expected files, each with the substrings its content check requires
fn expectations() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    let needles = proptest::collection::vec(needle(), 0..4);
    proptest::collection::btree_map(relative_path(), needles, 0..8)
}

fn tree_from(files: &BTreeMap<String, String>) -> GeneratedTree {
    let mut tree = GeneratedTree::new();
    for (path, content) in files {
        tree.insert(path, GeneratedFile::new(content.as_str(), "rbac", "spring"))
            .unwrap();
    }
    tree
}

fn checks_from(expected: &BTreeMap<String, Vec<String>>) -> Vec<FileContentCheck> {
    expected
        .iter()
        .filter(|(_, needles)| !needles.is_empty())
        .map(|(path, needles)| FileContentCheck::new(path.as_str(), needles.iter().cloned()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// PROPERTY: a tree that holds every expected file with every expected
    /// substring produces no failures.
    #[test]
    fn property_complete_tree_passes(expected in expectations()) {
        let files: BTreeMap<String, String> = expected
            .iter()
            .map(|(path, needles)| (path.clone(), format!("header\n{}\n", needles.join("\n"))))
            .collect();
        let paths: Vec<String> = expected.keys().cloned().collect();

        let failures = verify(&tree_from(&files), &paths, &checks_from(&expected));

        prop_assert!(failures.is_empty(), "{:?}", failures);
    }

    /// PROPERTY: every absent file yields exactly one `MissingFile`, in
    /// expected order, and never a substring failure.
    #[test]
    fn property_absent_files_are_each_reported_once(
        expected in expectations(),
        keep in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let paths: Vec<String> = expected.keys().cloned().collect();
        let files: BTreeMap<String, String> = expected
            .iter()
            .zip(keep.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|((path, needles), _)| (path.clone(), needles.join("\n")))
            .collect();

        let failures = verify(&tree_from(&files), &paths, &checks_from(&expected));

        let missing: Vec<Failure> = paths
            .iter()
            .filter(|p| !files.contains_key(*p))
            .map(|p| Failure::missing_file(p.as_str()))
            .collect();
        prop_assert_eq!(failures, missing);
    }

    /// PROPERTY: the verifier never panics and never reports more failures
    /// than there are expectations.
    #[test]
    fn property_failures_are_bounded(
        expected in expectations(),
        contents in proptest::collection::btree_map(relative_path(), "(?s).{0,64}", 0..8),
    ) {
        let paths: Vec<String> = expected.keys().cloned().collect();
        let checks = checks_from(&expected);
        let bound = paths.len() + checks.iter().map(|c| c.contains.len()).sum::<usize>();

        let failures = verify(&tree_from(&contents), &paths, &checks);

        prop_assert!(failures.len() <= bound);
    }
}
