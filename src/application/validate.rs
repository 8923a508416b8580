//! Validate Use Case
//!
//! Runs every stage of the project pipeline that can fail and collects all
//! problems instead of stopping at the first one. Stages that depend on an
//! earlier stage are skipped when it failed.

use serde::Serialize;
use tracing::debug;

use crate::config::{Config, ConfigWarning};
use crate::domain::entities::{CanonicalTemplate, CanonicalTemplates, Registry};
use crate::domain::ports::TemplateSource;
use crate::domain::services::Generator;

/// Which pipeline stage a problem came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Template,
    Descriptor,
    Rules,
    Layout,
    Generation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Template => "template",
            Stage::Descriptor => "descriptor",
            Stage::Rules => "rules",
            Stage::Layout => "layout",
            Stage::Generation => "generation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub stage: Stage,
    pub message: String,
}

impl Problem {
    fn new(stage: Stage, message: impl ToString) -> Self {
        Self {
            stage,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidateResult {
    pub problems: Vec<Problem>,
    /// Unknown configuration keys and placeholders that matched nothing
    pub warnings: Vec<String>,
    pub module_count: usize,
    pub rule_count: usize,
    pub artifact_count: usize,
}

impl ValidateResult {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

pub struct ValidateUseCase<T: TemplateSource> {
    templates: T,
}

impl<T: TemplateSource> ValidateUseCase<T> {
    pub fn new(templates: T) -> Self {
        Self { templates }
    }

    pub fn execute(&self, config: &Config, config_warnings: &[ConfigWarning]) -> ValidateResult {
        let mut result = ValidateResult {
            warnings: config_warnings.iter().map(ToString::to_string).collect(),
            ..Default::default()
        };

        let templates = self.load_templates(config, &mut result);

        let generator = match config.rule_factory().and_then(|f| Generator::from_factory(&f)) {
            Ok(g) => {
                result.rule_count = g.rules().len();
                Some(g.strict(config.strict))
            }
            Err(e) => {
                result.problems.push(Problem::new(Stage::Rules, e));
                None
            }
        };

        let layout = match config.layout() {
            Ok(l) => Some(l),
            Err(e) => {
                result.problems.push(Problem::new(Stage::Layout, e));
                None
            }
        };

        // Descriptors are checked even without templates
        let mut registry = Registry::new(
            config.palette.clone(),
            templates
                .clone()
                .unwrap_or_else(|| CanonicalTemplates::new(CanonicalTemplate::default())),
        );
        match registry.register_all(config.modules.iter().cloned()) {
            Ok(()) => result.module_count = registry.len(),
            Err(errors) => {
                result
                    .problems
                    .extend(errors.into_iter().map(|e| Problem::new(Stage::Descriptor, e)));
                return result;
            }
        }

        let (Some(_), Some(generator), Some(layout)) = (templates, generator, layout) else {
            return result;
        };

        match generator.generate(&registry) {
            Ok(artifacts) => {
                result.artifact_count = artifacts.len();
                for a in artifacts.artifacts() {
                    if !a.unmatched_placeholders().is_empty() {
                        result.warnings.push(format!(
                            "module '{}' {}: placeholders matched nothing: {}",
                            a.module_key(),
                            a.operation(),
                            a.unmatched_placeholders().join(", ")
                        ));
                    }
                }
                if let Err(e) = layout.place(&artifacts) {
                    result.problems.push(Problem::new(Stage::Layout, e));
                }
            }
            Err(e) => result.problems.push(Problem::new(Stage::Generation, e)),
        }

        debug!(problems = result.problems.len(), "validation finished");
        result
    }

    fn load_templates(
        &self,
        config: &Config,
        result: &mut ValidateResult,
    ) -> Option<CanonicalTemplates> {
        let t = &config.template;
        let default = self.load_one(&t.path, result);
        let mut overrides = Vec::new();
        let mut ok = default.is_some();
        for (op, name) in &t.overrides {
            match self.load_one(name, result) {
                Some(template) => overrides.push((*op, template)),
                None => ok = false,
            }
        }
        let default = default.filter(|_| ok)?;
        Some(
            overrides
                .into_iter()
                .fold(CanonicalTemplates::new(default), |acc, (op, template)| {
                    acc.with_override(op, template)
                }),
        )
    }

    fn load_one(&self, name: &str, result: &mut ValidateResult) -> Option<CanonicalTemplate> {
        let body = match self.templates.load(name) {
            Ok(body) => body,
            Err(e) => {
                result
                    .problems
                    .push(Problem::new(Stage::Template, format!("{name}: {e}")));
                return None;
            }
        };
        match CanonicalTemplate::parse(body) {
            Ok(t) => Some(t),
            Err(e) => {
                result
                    .problems
                    .push(Problem::new(Stage::Template, format!("{name}: {e}")));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_with_warnings;
    use crate::domain::ports::{FsError, FsResult};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct MapTemplates(HashMap<&'static str, &'static str>);

    impl TemplateSource for MapTemplates {
        fn load(&self, name: &str) -> FsResult<String> {
            self.0
                .get(name)
                .map(|s| s.to_string())
                .ok_or_else(|| FsError::NotFound(PathBuf::from(name)))
        }
    }

    const BASE: &str = r#"
[template]
path = "dashboard.html"

[template.source]
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"
"#;

    const DENTAL: &str = r#"
[[modules]]
key = "dental"
title = "Dental"
icon = "fas fa-tooth"
color = "info"
capabilities = ["dashboard"]
"#;

    fn validate(config: &str, templates: &[(&'static str, &'static str)]) -> ValidateResult {
        let (config, warnings) =
            parse_with_warnings(config, Path::new("hms-scaffold.toml")).unwrap();
        ValidateUseCase::new(MapTemplates(templates.iter().copied().collect()))
            .execute(&config, &warnings)
    }

    #[test]
    fn valid_project_has_no_problems() {
        let result = validate(
            &format!("{BASE}{DENTAL}"),
            &[("dashboard.html", "<i class=\"fas fa-eye\"></i> Oftalmología")],
        );

        assert!(result.is_valid(), "{:?}", result.problems);
        assert_eq!(result.module_count, 1);
        assert_eq!(result.artifact_count, 1);
    }

    #[test]
    fn reports_every_problem_at_once() {
        let config = format!(
            "{BASE}\n[output]\npattern = \"../{{key}}.html\"\n{DENTAL}{DENTAL}\n[[modules]]\nkey = \"Bad Key\"\ntitle = \"x\"\nicon = \"x\"\ncolor = \"teal\"\ncapabilities = []\n"
        );

        let result = validate(&config, &[]);

        let stages: Vec<_> = result.problems.iter().map(|p| p.stage).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Template,
                Stage::Layout,
                Stage::Descriptor,
                Stage::Descriptor
            ]
        );
        assert!(result.problems[2].message.contains("dental"));
    }

    #[test]
    fn malformed_template_is_a_problem() {
        let result = validate(
            &format!("{BASE}{DENTAL}"),
            &[("dashboard.html", "<!-- scaffold:endregion -->")],
        );

        assert_eq!(result.problems.len(), 1);
        assert_eq!(result.problems[0].stage, Stage::Template);
        assert!(result.problems[0].message.starts_with("dashboard.html:"));
    }

    #[test]
    fn unmatched_placeholders_are_warnings_unless_strict() {
        let lenient = validate(&format!("{BASE}{DENTAL}"), &[("dashboard.html", "Oftalmología")]);
        assert!(lenient.is_valid());
        assert!(lenient
            .warnings
            .iter()
            .any(|w| w.contains("placeholders matched nothing")));

        let strict = validate(
            &format!("strict = true\n{BASE}{DENTAL}"),
            &[("dashboard.html", "Oftalmología")],
        );
        assert_eq!(strict.problems[0].stage, Stage::Generation);
    }

    #[test]
    fn config_warnings_are_carried() {
        let result = validate(
            &format!("{BASE}\n[output]\ndirr = \"x\"\n"),
            &[("dashboard.html", "Oftalmología")],
        );
        assert!(result.warnings[0].contains("did you mean 'dir'"));
    }
}
