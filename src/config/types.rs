//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::ModuleDescriptor;
use crate::domain::services::{
    Layout, LayoutError, Replacement, RuleFactory, RuleSetError, SourceTokens, SubstitutionRule,
    DEFAULT_PATTERN,
};
use crate::domain::value_objects::{Operation, Palette};
use crate::error::ScaffoldResult;

use super::loader::{self, ConfigWarning};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "hms-scaffold.toml";

/// Project configuration (`hms-scaffold.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fail generation when a rule matches nothing
    #[serde(default)]
    pub strict: bool,

    /// Accepted color tokens; defaults to the Bootstrap theme colors
    #[serde(default)]
    pub palette: Palette,

    pub template: TemplateConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

/// The canonical template and what it was written with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Default template, relative to the configuration file
    pub path: String,

    /// Per-operation templates (`list = "templates/list.html"`)
    #[serde(default)]
    pub overrides: BTreeMap<Operation, String>,

    /// Literal tokens of the module the template was authored for
    pub source: SourceConfig,

    /// Class stems combined with the color (`bg` → `bg-primary`)
    #[serde(default)]
    pub class_stems: Option<Vec<String>>,

    /// Region in which the bare color word is also replaced
    #[serde(default)]
    pub color_word_region: Option<String>,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub title: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// An extra substitution rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub placeholder: String,
    /// Replacement pattern with `{key}`, `{title}`, `{icon}`, `{color}`,
    /// `{description}` fields
    pub replacement: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default = "default_lockfile")]
    pub lockfile: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            pattern: default_pattern(),
            lockfile: default_lockfile(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_lockfile() -> PathBuf {
    PathBuf::from(crate::infrastructure::LOCKFILE_NAME)
}

impl Config {
    /// Load from a TOML or YAML file, discarding warnings
    pub fn load(path: &Path) -> ScaffoldResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    pub fn load_with_warnings(path: &Path) -> ScaffoldResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    pub fn source_tokens(&self) -> SourceTokens {
        let s = &self.template.source;
        SourceTokens {
            title: s.title.clone(),
            icon: s.icon.clone(),
            color: s.color.clone(),
            description: s.description.clone(),
        }
    }

    /// Rule factory described by the `[template]` section
    pub fn rule_factory(&self) -> Result<RuleFactory, RuleSetError> {
        let t = &self.template;
        let color = &t.source.color;
        if !color.trim().is_empty() && !self.palette.contains(color) {
            return Err(RuleSetError::UnknownSourceColor {
                color: color.clone(),
                palette: self.palette.tokens().join(", "),
            });
        }
        let mut factory = RuleFactory::new(self.source_tokens());
        if let Some(stems) = &t.class_stems {
            factory = factory.with_class_stems(stems.iter().cloned());
        }
        if let Some(region) = &t.color_word_region {
            factory = factory.with_color_word_region(region.clone());
        }
        for rule in &t.rules {
            let mut r = SubstitutionRule::new(&rule.placeholder, Replacement::pattern(&rule.replacement)?);
            if let Some(region) = &rule.region {
                r = r.in_region(region.clone());
            }
            factory = factory.with_rule(r);
        }
        Ok(factory)
    }

    pub fn layout(&self) -> Result<Layout, LayoutError> {
        Layout::new(self.output.pattern.clone())
    }
}
