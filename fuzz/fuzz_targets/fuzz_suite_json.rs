#![no_main]

use genesis3_conformance::domain::services::validate_suite;
use genesis3_conformance::ModuleTestSuite;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(suite) = serde_json::from_slice::<ModuleTestSuite>(data) {
        let _ = validate_suite(&suite);
    }
});
