//! Property tests for descriptor registration.

use proptest::prelude::*;

use hms_scaffold::domain::entities::{
    is_valid_module_key, CanonicalTemplate, CanonicalTemplates, ValidationError,
};
use hms_scaffold::{ModuleDescriptor, Operation, Palette, Registry};

fn empty_registry() -> Registry {
    Registry::new(
        Palette::bootstrap(),
        CanonicalTemplates::new(CanonicalTemplate::parse("x").unwrap()),
    )
}

fn module(key: &str, title: &str) -> ModuleDescriptor {
    ModuleDescriptor::new(key, title)
        .with_icon("fas fa-tooth")
        .with_color("info")
        .with_capabilities([Operation::Dashboard])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a duplicate key is rejected and the first descriptor stays.
    #[test]
    fn property_duplicate_key_keeps_first(
        key in "[a-z][a-z0-9_]{0,15}",
        first in "[A-Za-z ]{1,10}",
        second in "[A-Za-z ]{1,10}",
    ) {
        let mut registry = empty_registry();
        registry.register(module(&key, &first)).unwrap();

        let err = registry.register(module(&key, &second)).unwrap_err();

        prop_assert_eq!(err, ValidationError::DuplicateKey { key: key.clone() });
        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(&registry.get(&key).unwrap().title, &first);
    }

    /// PROPERTY: registration accepts exactly the url-safe keys.
    #[test]
    fn property_key_validation_matches_registration(key in "\\PC{0,12}") {
        let mut registry = empty_registry();
        let accepted = registry.register(module(&key, "T")).is_ok();
        prop_assert_eq!(accepted, is_valid_module_key(&key));
    }

    /// PROPERTY: a failed batch registers nothing.
    #[test]
    fn property_register_all_is_all_or_nothing(
        keys in proptest::collection::vec("[a-z]{1,4}", 1..6),
        bad_at in any::<prop::sample::Index>(),
    ) {
        let mut modules: Vec<_> = keys.iter().map(|k| module(k, "T")).collect();
        let i = bad_at.index(modules.len());
        modules[i].color_token = "teal".to_string();

        let mut registry = empty_registry();
        let result = registry.register_all(modules);

        prop_assert!(result.is_err());
        prop_assert!(registry.is_empty());
    }
}
