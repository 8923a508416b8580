use super::*;
use crate::domain::value_objects::Operation;

fn dental() -> ModuleDescriptor {
    ModuleDescriptor::new("dental", "Dental")
        .with_icon("fas fa-tooth")
        .with_color("info")
        .with_description("pacientes dentales")
        .with_capabilities([Operation::Dashboard])
}

fn template(src: &str) -> CanonicalTemplate {
    CanonicalTemplate::parse(src).unwrap()
}

fn class_rule(stem: &str) -> SubstitutionRule {
    SubstitutionRule::new(
        format!("{}-primary", stem),
        Replacement::ColorClass(stem.to_string()),
    )
}

// === Ordering validation ===

#[test]
fn shorter_placeholder_first_is_a_conflict() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Color),
        class_rule("btn-outline"),
    ];

    let err = RuleSet::new(rules).unwrap_err();

    assert_eq!(
        err,
        RuleSetError::Conflict {
            earlier: "primary".to_string(),
            earlier_index: 0,
            later: "btn-outline-primary".to_string(),
            later_index: 1,
            scope: RuleScope::Document,
        }
    );
}

#[test]
fn longer_placeholder_first_is_accepted() {
    let rules = vec![
        class_rule("btn-outline"),
        SubstitutionRule::new("primary", Replacement::Color),
    ];
    assert!(RuleSet::new(rules).is_ok());
}

#[test]
fn disjoint_regions_never_conflict() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Color).in_region("hero"),
        class_rule("btn").in_region("footer"),
    ];
    assert!(RuleSet::new(rules).is_ok());
}

#[test]
fn document_rule_conflicts_with_later_region_rule() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Color),
        class_rule("bg").in_region("hero"),
    ];
    assert!(matches!(
        RuleSet::new(rules),
        Err(RuleSetError::Conflict { scope: RuleScope::Region(ref r), .. }) if r == "hero"
    ));
}

#[test]
fn same_placeholder_region_then_document_is_accepted() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Color).in_region("hero"),
        SubstitutionRule::new("primary", Replacement::Title),
    ];
    assert!(RuleSet::new(rules).is_ok());
}

#[test]
fn duplicate_document_placeholder_is_a_conflict() {
    let rules = vec![
        SubstitutionRule::new("Oftalmología", Replacement::Title),
        SubstitutionRule::new("Oftalmología", Replacement::Key),
    ];
    assert!(matches!(
        RuleSet::new(rules),
        Err(RuleSetError::Conflict { .. })
    ));
}

#[test]
fn empty_placeholder_is_rejected() {
    let rules = vec![
        class_rule("bg"),
        SubstitutionRule::new("", Replacement::Title),
    ];
    assert_eq!(
        RuleSet::new(rules).unwrap_err(),
        RuleSetError::EmptyPlaceholder { index: 1 }
    );
}

#[test]
fn by_specificity_orders_longest_first() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Color),
        class_rule("btn"),
        class_rule("btn-outline"),
        class_rule("bg"),
    ];

    let set = RuleSet::by_specificity(rules).unwrap();
    let order: Vec<_> = set.rules().iter().map(|r| r.placeholder.as_str()).collect();

    assert_eq!(
        order,
        vec!["btn-outline-primary", "btn-primary", "bg-primary", "primary"]
    );
}

#[test]
fn by_specificity_puts_region_rule_before_document_rule_on_ties() {
    let rules = vec![
        SubstitutionRule::new("primary", Replacement::Title),
        SubstitutionRule::new("primary", Replacement::Color).in_region("hero"),
    ];
    let set = RuleSet::by_specificity(rules).unwrap();
    assert_eq!(set.rules()[0].scope, RuleScope::Region("hero".to_string()));
    assert_eq!(set.regions().collect::<Vec<_>>(), vec!["hero"]);
}

// === Replacement ===

#[test]
fn pattern_interpolates_known_fields() {
    let r = Replacement::pattern("{title} ({key}) - {color}").unwrap();
    assert_eq!(r.resolve(&dental()), "Dental (dental) - info");
}

#[test]
fn pattern_keeps_stray_braces() {
    let r = Replacement::Pattern("{ {title} }".to_string());
    assert_eq!(r.resolve(&dental()), "{ Dental }");
}

#[test]
fn pattern_rejects_unknown_field() {
    let err = Replacement::pattern("{patient}").unwrap_err();
    assert_eq!(
        err,
        RuleSetError::UnknownPatternField {
            pattern: "{patient}".to_string(),
            field: "patient".to_string(),
        }
    );
}

#[test]
fn color_class_joins_stem_and_token() {
    assert_eq!(
        Replacement::ColorClass("btn-outline".into()).resolve(&dental()),
        "btn-outline-info"
    );
}

// === Apply ===

#[test]
fn apply_replaces_every_occurrence() {
    let rules = RuleSet::new(vec![SubstitutionRule::new(
        "Oftalmología",
        Replacement::Title,
    )])
    .unwrap();

    let out = apply(
        &template("<title>Oftalmología</title><h1>Oftalmología</h1>"),
        &rules,
        &dental(),
    );

    assert_eq!(out.text, "<title>Dental</title><h1>Dental</h1>");
    assert_eq!(out.matches, vec![("Oftalmología".to_string(), 2)]);
    assert!(out.unmatched().is_empty());
}

#[test]
fn apply_reports_unmatched_rules_without_failing() {
    let rules = RuleSet::new(vec![
        SubstitutionRule::new("fas fa-eye", Replacement::Icon),
        SubstitutionRule::new("Oftalmología", Replacement::Title),
    ])
    .unwrap();

    let out = apply(&template("<h1>Oftalmología</h1>"), &rules, &dental());

    assert_eq!(out.text, "<h1>Dental</h1>");
    assert_eq!(out.unmatched(), vec!["fas fa-eye".to_string()]);
}

#[test]
fn replaced_text_is_not_substituted_again() {
    // The description value contains the icon placeholder; the icon rule must not touch it.
    let module = dental().with_description("ver fas fa-eye");
    let rules = RuleSet::new(vec![
        SubstitutionRule::new("pacientes oftalmológicos", Replacement::Description),
        SubstitutionRule::new("fas fa-eye", Replacement::Icon),
    ])
    .unwrap();

    let out = apply(
        &template("<i class=\"fas fa-eye\"></i> pacientes oftalmológicos"),
        &rules,
        &module,
    );

    assert_eq!(out.text, "<i class=\"fas fa-tooth\"></i> ver fas fa-eye");
}

#[test]
fn region_rule_only_touches_its_region() {
    let src = "<p>primary care</p>\n\
               <!-- scaffold:region badge -->\n\
               <span class=\"badge primary\"></span>\n\
               <!-- scaffold:endregion -->\n";
    let rules =
        RuleSet::new(vec![SubstitutionRule::new("primary", Replacement::Color).in_region("badge")])
            .unwrap();

    let out = apply(&template(src), &rules, &dental());

    assert_eq!(
        out.text,
        "<p>primary care</p>\n<span class=\"badge info\"></span>\n"
    );
}

#[test]
fn apply_on_template_without_placeholders_is_identity() {
    let rules = RuleSet::new(vec![class_rule("bg")]).unwrap();
    let out = apply(&template("<div></div>"), &rules, &dental());
    assert_eq!(out.text, "<div></div>");
    assert_eq!(out.unmatched(), vec!["bg-primary".to_string()]);
}

#[test]
fn apply_is_deterministic() {
    let rules = RuleSet::by_specificity(vec![
        class_rule("btn"),
        class_rule("btn-outline"),
        SubstitutionRule::new("Oftalmología", Replacement::Title),
    ])
    .unwrap();
    let t = template("<a class=\"btn btn-primary\">Oftalmología</a><a class=\"btn-outline-primary\"/>");

    let first = apply(&t, &rules, &dental());
    let second = apply(&t, &rules, &dental());

    assert_eq!(first, second);
}

#[test]
fn adjacent_occurrences_are_all_replaced() {
    let rules = RuleSet::new(vec![SubstitutionRule::new("ab", Replacement::Key)]).unwrap();
    let out = apply(&template("ababab"), &rules, &dental());
    assert_eq!(out.text, "dentaldentaldental");
    assert_eq!(out.matches[0].1, 3);
}
