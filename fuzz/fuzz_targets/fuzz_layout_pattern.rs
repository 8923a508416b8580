#![no_main]

use std::path::Component;

use libfuzzer_sys::fuzz_target;

use hms_scaffold::domain::services::Layout;
use hms_scaffold::Operation;

fuzz_target!(|data: &[u8]| {
    if let Ok(pattern) = std::str::from_utf8(data) {
        // An accepted pattern never places a file outside the output root
        if let Ok(layout) = Layout::new(pattern) {
            let path = layout.path_for("dental", Operation::List);
            assert!(path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir)));
        }
    }
});
