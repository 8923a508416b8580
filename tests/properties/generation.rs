//! Property tests for rendering and the generator.

use std::collections::BTreeSet;

use proptest::prelude::*;

use hms_scaffold::domain::entities::{CanonicalTemplate, CanonicalTemplates};
use hms_scaffold::domain::services::{RuleFactory, SourceTokens};
use hms_scaffold::domain::value_objects::BOOTSTRAP_PALETTE;
use hms_scaffold::{Generator, ModuleDescriptor, Operation, Palette, Registry};

const TEMPLATE: &str = "<h1 class=\"text-primary\"><i class=\"fas fa-eye\"></i> Oftalmología</h1>\n";

fn generator() -> Generator {
    Generator::from_factory(&RuleFactory::new(SourceTokens {
        title: "Oftalmología".to_string(),
        icon: "fas fa-eye".to_string(),
        color: "primary".to_string(),
        description: String::new(),
    }))
    .unwrap()
}

fn registry(modules: Vec<ModuleDescriptor>) -> Registry {
    let template = CanonicalTemplate::parse(TEMPLATE).unwrap();
    let mut registry = Registry::new(Palette::bootstrap(), CanonicalTemplates::new(template));
    registry.register_all(modules).unwrap();
    registry
}

/// Free text that often contains the canonical tokens themselves
fn tricky_text() -> impl Strategy<Value = String> {
    let plain = || proptest::string::string_regex("[A-Za-zíóáé ]{1,12}").unwrap();
    prop_oneof![
        plain(),
        Just("Oftalmología".to_string()),
        Just("fas fa-eye".to_string()),
        Just("text-primary".to_string()),
        plain().prop_map(|s| format!("{s} Oftalmología primary")),
    ]
}

fn color() -> impl Strategy<Value = String> {
    proptest::sample::select(BOOTSTRAP_PALETTE.to_vec()).prop_map(str::to_string)
}

fn capabilities() -> impl Strategy<Value = BTreeSet<Operation>> {
    proptest::sample::subsequence(Operation::ALL.to_vec(), 1..=Operation::ALL.len())
        .prop_map(|ops| ops.into_iter().collect())
}

fn descriptor(key: String) -> impl Strategy<Value = ModuleDescriptor> {
    (tricky_text(), tricky_text(), color(), capabilities()).prop_map(
        move |(title, icon, color, caps)| {
            ModuleDescriptor::new(key.clone(), title)
                .with_icon(icon)
                .with_color(color)
                .with_capabilities(caps)
        },
    )
}

fn descriptors() -> impl Strategy<Value = Vec<ModuleDescriptor>> {
    (1usize..=5).prop_flat_map(|n| {
        (0..n)
            .map(|i| descriptor(format!("mod{i}")))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a replacement value is never substituted again, even when it
    /// contains a placeholder.
    #[test]
    fn property_replacements_are_never_resubstituted(d in descriptor("dental".to_string())) {
        let expected = format!(
            "<h1 class=\"text-{}\"><i class=\"{}\"></i> {}</h1>\n",
            d.color_token, d.icon_token, d.title
        );
        let artifacts = generator().generate(&registry(vec![d.clone()])).unwrap();

        for artifact in artifacts.artifacts() {
            prop_assert_eq!(artifact.content(), expected.as_str());
        }
    }

    /// PROPERTY: the artifacts of a module are exactly its capabilities.
    #[test]
    fn property_artifacts_match_capabilities(modules in descriptors()) {
        let artifacts = generator().generate(&registry(modules.clone())).unwrap();

        for d in &modules {
            let ops: BTreeSet<Operation> = artifacts
                .for_module(&d.key)
                .map(|a| a.operation())
                .collect();
            prop_assert_eq!(&ops, &d.capabilities);
        }
        let total: usize = modules.iter().map(|d| d.capabilities.len()).sum();
        prop_assert_eq!(artifacts.len(), total);
    }

    /// PROPERTY: generating twice from the same registry is byte-identical.
    #[test]
    fn property_generation_is_idempotent(modules in descriptors()) {
        let registry = registry(modules);
        let first = generator().generate(&registry).unwrap();
        let second = generator().generate(&registry).unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: a module's content does not depend on registration order.
    #[test]
    fn property_content_independent_of_registration_order(modules in descriptors()) {
        let forward = generator().generate(&registry(modules.clone())).unwrap();
        let mut reversed_modules = modules.clone();
        reversed_modules.reverse();
        let reversed = generator().generate(&registry(reversed_modules)).unwrap();

        for artifact in forward.artifacts() {
            let other = reversed
                .get(artifact.module_key(), artifact.operation())
                .map(|a| a.content());
            prop_assert_eq!(Some(artifact.content()), other);
        }
    }
}
