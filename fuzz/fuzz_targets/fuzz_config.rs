#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing (both formats) should never panic
        let _ = hms_scaffold::config::parse_with_warnings(content, Path::new("hms-scaffold.toml"));
        let _ = hms_scaffold::config::parse_with_warnings(content, Path::new("hms-scaffold.yaml"));
    }
});
