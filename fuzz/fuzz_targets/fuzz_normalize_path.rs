#![no_main]

use genesis3_conformance::domain::entities::normalize_path;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let once = normalize_path(path);
        assert_eq!(normalize_path(&once), once);
    }
});
