//! Tests for the config module

use std::path::{Path, PathBuf};

use super::*;
use crate::domain::services::{RuleScope, RuleSetError, DEFAULT_PATTERN};
use crate::domain::value_objects::{Operation, Palette};
use crate::error::ScaffoldError;

const FULL: &str = r#"
strict = true
palette = ["primary", "info", "teal"]

[template]
path = "templates/dashboard.html"
color_word_region = "badge"
class_stems = ["bg", "text"]

[template.overrides]
list = "templates/list.html"

[template.source]
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"
description = "pacientes oftalmológicos"

[[template.rules]]
placeholder = "oftalmologia:dashboard"
replacement = "{key}:dashboard"

[output]
dir = "apps"
pattern = "{key}/{role}.html"

[[modules]]
key = "dental"
title = "Dental"
icon = "fas fa-tooth"
color = "info"
description = "pacientes dentales"
capabilities = ["dashboard", "list"]
"#;

const MINIMAL: &str = r#"
[template]
path = "dashboard.html"

[template.source]
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"
"#;

fn parse(content: &str) -> Config {
    parse_with_warnings(content, Path::new("hms-scaffold.toml"))
        .unwrap()
        .0
}

#[test]
fn full_config_parses() {
    let config = parse(FULL);

    assert!(config.strict);
    assert_eq!(config.palette, Palette::new(["primary", "info", "teal"]));
    assert_eq!(config.template.path, "templates/dashboard.html");
    assert_eq!(
        config.template.overrides.get(&Operation::List).map(String::as_str),
        Some("templates/list.html")
    );
    assert_eq!(config.output.dir, PathBuf::from("apps"));
    assert_eq!(config.modules.len(), 1);
    assert_eq!(config.modules[0].icon_token, "fas fa-tooth");
    assert!(config.modules[0].supports(Operation::List));
}

#[test]
fn minimal_config_uses_defaults() {
    let config = parse(MINIMAL);

    assert!(!config.strict);
    assert_eq!(config.palette, Palette::bootstrap());
    assert_eq!(config.output.pattern, DEFAULT_PATTERN);
    assert_eq!(config.output.lockfile, PathBuf::from("hms-scaffold.lock"));
    assert_eq!(config.output.dir, PathBuf::from("."));
    assert!(config.modules.is_empty());
    assert!(config.template.source.description.is_empty());
}

#[test]
fn rule_factory_reflects_template_section() {
    let rules = parse(FULL).rule_factory().unwrap().build().unwrap();
    let placeholders: Vec<_> = rules.rules().iter().map(|r| r.placeholder.as_str()).collect();

    assert!(placeholders.contains(&"oftalmologia:dashboard"));
    assert!(placeholders.contains(&"bg-primary"));
    assert!(!placeholders.contains(&"btn-primary"));
    assert_eq!(
        rules.rules().last().map(|r| &r.scope),
        Some(&RuleScope::Region("badge".to_string()))
    );
}

#[test]
fn unknown_pattern_field_in_rule_is_rejected() {
    let content = format!(
        "{MINIMAL}\n[[template.rules]]\nplaceholder = \"x\"\nreplacement = \"{{patient}}\"\n"
    );
    assert!(parse(&content).rule_factory().is_err());
}

#[test]
fn source_color_outside_palette_is_rejected() {
    let content = FULL.replace("color = \"primary\"", "color = \"purple\"");
    assert!(matches!(
        parse(&content).rule_factory(),
        Err(RuleSetError::UnknownSourceColor { color, .. }) if color == "purple"
    ));
}

#[test]
fn empty_source_color_cannot_build_rules() {
    let content = FULL.replace("color = \"primary\"", "color = \"\"");
    let factory = parse(&content).rule_factory().unwrap();
    assert_eq!(factory.build().unwrap_err(), RuleSetError::EmptySourceColor);
}

#[test]
fn layout_uses_output_pattern() {
    let layout = parse(FULL).layout().unwrap();
    assert_eq!(
        layout.path_for("dental", Operation::Dashboard),
        PathBuf::from("dental/dashboard.html")
    );
}

#[test]
fn unknown_keys_produce_warnings_with_line_and_suggestion() {
    let content = format!("{MINIMAL}\n[output]\ndirr = \"apps\"\n");
    let (_, warnings) = parse_with_warnings(&content, Path::new("hms-scaffold.toml")).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "dirr");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("dir"));
    assert_eq!(warnings[0].line, Some(content.lines().position(|l| l.contains("dirr")).unwrap() + 1));
    assert!(warnings[0].to_string().contains("did you mean 'dir'"));
}

#[test]
fn yaml_config_parses() {
    let yaml = r#"
template:
  path: dashboard.html
  source:
    title: Oftalmología
    icon: fas fa-eye
    color: primary
modules:
  - key: dental
    title: Dental
    icon: fas fa-tooth
    color: info
    capabilities: [dashboard]
"#;
    let (config, warnings) = parse_with_warnings(yaml, Path::new("hms-scaffold.yaml")).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(config.modules[0].key, "dental");
}

#[test]
fn invalid_config_names_the_file() {
    let err = parse_with_warnings("template = 3", Path::new("broken.toml")).unwrap_err();
    assert!(matches!(err, ScaffoldError::Config { ref file, .. } if file == Path::new("broken.toml")));
}

#[test]
fn missing_file_is_config_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_with_warnings(&dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
    assert!(matches!(err, ScaffoldError::ConfigNotFound { .. }));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, FULL).unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.modules[0].key, "dental");
}
