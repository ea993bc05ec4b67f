//! Property tests for generated tree path handling.

use proptest::prelude::*;

use genesis3_conformance::domain::entities::{normalize_path, GeneratedFile, GeneratedTree};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,10}").unwrap()
}

/// The same relative path, spelled with random `./`, `//`, `\` and
/// `detour/../` segments
fn spellings() -> impl Strategy<Value = (String, String)> {
    proptest::collection::vec((segment(), 0usize..5), 1..5).prop_map(|parts| {
        let canonical = parts
            .iter()
            .map(|(s, _)| s.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let noisy = parts
            .iter()
            .map(|(s, style)| match style {
                0 => format!("{}/", s),
                1 => format!("./{}/", s),
                2 => format!("{}//", s),
                3 => format!("{}/detour/../", s),
                _ => format!("{}\\", s),
            })
            .collect::<String>();
        (canonical, noisy)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// PROPERTY: normalization never panics and is idempotent.
    #[test]
    fn property_normalize_is_idempotent(s in "(?s).{0,128}") {
        let once = normalize_path(&s);
        prop_assert_eq!(normalize_path(&once), once.clone());
        prop_assert!(!once.contains('\\'));
        prop_assert!(!once.starts_with('/'));
    }

    /// PROPERTY: every spelling of a path finds the same file.
    #[test]
    fn property_spellings_address_the_same_file((canonical, noisy) in spellings()) {
        let mut tree = GeneratedTree::new();
        tree.insert(&noisy, GeneratedFile::new("content", "rbac", "drf")).unwrap();

        prop_assert!(tree.contains(&canonical));
        prop_assert_eq!(tree.paths().collect::<Vec<_>>(), vec![canonical.as_str()]);
    }

    /// PROPERTY: identical content from two providers never conflicts.
    #[test]
    fn property_identical_content_merges(path in segment(), content in ".{0,32}") {
        let mut tree = GeneratedTree::new();
        tree.insert(&path, GeneratedFile::new(content.as_str(), "rbac", "spring")).unwrap();
        let again = tree.insert(&path, GeneratedFile::new(content.as_str(), "rbac", "drf"));
        prop_assert!(again.is_ok());
        prop_assert_eq!(tree.len(), 1);
    }
}
