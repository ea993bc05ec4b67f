#![no_main]

use genesis3_conformance::domain::services::validate_suite;
use genesis3_conformance::ModuleTestSuite;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Suite parsing and validation should never panic
        if let Ok(suite) = serde_yaml_ng::from_str::<ModuleTestSuite>(content) {
            let _ = validate_suite(&suite);
        }
    }
});
