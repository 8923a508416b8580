//! Canonical rule factory
//!
//! The canonical template is authored for one real module (historically
//! the ophthalmology dashboard). Its literal title, icon, color classes and
//! description are the placeholders; this factory turns them into the
//! standard rule set shared by every generated module.

use crate::domain::entities::ModuleDescriptor;

use super::substitution::{Replacement, RuleSet, RuleSetError, SubstitutionRule};

/// Bootstrap class stems substituted by default
pub const DEFAULT_CLASS_STEMS: [&str; 4] = ["btn-outline", "bg", "text", "btn"];

/// The literal values the canonical template was written with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTokens {
    pub title: String,
    pub icon: String,
    pub color: String,
    pub description: String,
}

impl SourceTokens {
    /// Read the tokens off an existing descriptor
    pub fn from_descriptor(d: &ModuleDescriptor) -> Self {
        Self {
            title: d.title.clone(),
            icon: d.icon_token.clone(),
            color: d.color_token.clone(),
            description: d.description.clone(),
        }
    }
}

/// Builds the rule set applied to every module
#[derive(Debug, Clone)]
pub struct RuleFactory {
    source: SourceTokens,
    class_stems: Vec<String>,
    color_word_region: Option<String>,
    extra: Vec<SubstitutionRule>,
}

impl RuleFactory {
    pub fn new(source: SourceTokens) -> Self {
        Self {
            source,
            class_stems: DEFAULT_CLASS_STEMS.iter().map(|s| s.to_string()).collect(),
            color_word_region: None,
            extra: Vec::new(),
        }
    }

    /// Replace the default class stems (`bg`, `text`, ...)
    pub fn with_class_stems<I, S>(mut self, stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_stems = stems.into_iter().map(Into::into).collect();
        self
    }

    /// Also replace the bare color word, but only inside `region`
    ///
    /// A bare word like `primary` is too common to replace document-wide.
    pub fn with_color_word_region(mut self, region: impl Into<String>) -> Self {
        self.color_word_region = Some(region.into());
        self
    }

    pub fn with_rule(mut self, rule: SubstitutionRule) -> Self {
        self.extra.push(rule);
        self
    }

    pub fn source(&self) -> &SourceTokens {
        &self.source
    }

    /// Assemble and validate the rule set, most specific placeholder first
    pub fn build(&self) -> Result<RuleSet, RuleSetError> {
        let src = &self.source;
        if src.color.trim().is_empty() {
            return Err(RuleSetError::EmptySourceColor);
        }
        let mut rules = vec![
            SubstitutionRule::new(&src.title, Replacement::Title),
            SubstitutionRule::new(&src.icon, Replacement::Icon),
        ];
        for stem in &self.class_stems {
            rules.push(SubstitutionRule::new(
                format!("{}-{}", stem, src.color),
                Replacement::ColorClass(stem.clone()),
            ));
        }
        if !src.description.is_empty() {
            rules.push(SubstitutionRule::new(
                &src.description,
                Replacement::Description,
            ));
        }
        if let Some(region) = &self.color_word_region {
            rules.push(SubstitutionRule::new(&src.color, Replacement::Color).in_region(region));
        }
        rules.extend(self.extra.iter().cloned());

        RuleSet::by_specificity(rules)
    }
}
