#![no_main]

use libfuzzer_sys::fuzz_target;

use hms_scaffold::domain::entities::CanonicalTemplate;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Region parsing should never panic, and a parsed template keeps its text
        if let Ok(template) = CanonicalTemplate::parse(source) {
            assert_eq!(template.source(), source);
        }
    }
});
