//! Property tests for output layout patterns.

use std::path::Component;

use proptest::prelude::*;

use hms_scaffold::domain::services::Layout;
use hms_scaffold::Operation;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{key}".to_string()),
        Just("{role}.html".to_string()),
        Just("..".to_string()),
        Just(".".to_string()),
        Just("".to_string()),
        "[a-z_]{1,8}",
    ]
}

fn pattern() -> impl Strategy<Value = String> {
    (any::<bool>(), proptest::collection::vec(segment(), 1..5)).prop_map(|(absolute, segs)| {
        let joined = segs.join("/");
        if absolute {
            format!("/{joined}")
        } else {
            joined
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an accepted pattern only produces paths inside the output root.
    #[test]
    fn property_accepted_patterns_stay_inside_root(pattern in pattern()) {
        if let Ok(layout) = Layout::new(pattern) {
            for op in Operation::ALL {
                let path = layout.path_for("dental", op);
                prop_assert!(path
                    .components()
                    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir)));
            }
        }
    }

    /// PROPERTY: patterns naming both fields give every artifact its own path.
    #[test]
    fn property_key_and_role_patterns_are_injective(
        prefix in "[a-z]{1,6}",
        a in "[a-z]{1,6}",
        b in "[a-z]{1,6}",
    ) {
        let layout = Layout::new(format!("{prefix}/{{key}}/{{role}}.html")).unwrap();
        for op in Operation::ALL {
            for other in Operation::ALL {
                let same = layout.path_for(&a, op) == layout.path_for(&b, other);
                prop_assert_eq!(same, a == b && op == other);
            }
        }
    }
}
