//! Generator service
//!
//! Walks the registry in registration order, asks the binding table which
//! operations each module exposes and renders the operation's canonical
//! template through the substitution engine. The generator holds nothing
//! but the validated rule set, so the same registry always yields the same
//! artifact set.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::entities::{
    ArtifactSet, CanonicalTemplates, GeneratedArtifact, ModuleDescriptor, Registry,
};
use crate::domain::value_objects::Operation;

use super::bindings::bindings_for;
use super::rules::RuleFactory;
use super::substitution::{apply, RuleSet, RuleSetError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("two artifacts for module '{module_key}' operation '{operation}'")]
    ArtifactCollision {
        module_key: String,
        operation: Operation,
    },

    #[error(
        "module '{module_key}' {operation}: placeholders matched nothing: {}",
        .placeholders.join(", ")
    )]
    UnmatchedPlaceholder {
        module_key: String,
        operation: Operation,
        placeholders: Vec<String>,
    },

    #[error("rule region '{region}' does not exist in any canonical template")]
    UnknownRegion { region: String },

    #[error(transparent)]
    Rules(#[from] RuleSetError),
}

/// Pure registry → artifact-set function
#[derive(Debug, Clone)]
pub struct Generator {
    rules: RuleSet,
    strict: bool,
}

impl Generator {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            strict: false,
        }
    }

    /// Build the rule set once from a factory
    pub fn from_factory(factory: &RuleFactory) -> Result<Self, RuleSetError> {
        Ok(Self::new(factory.build()?))
    }

    /// Treat a rule that matches nothing as an error instead of a finding
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn generate(&self, registry: &Registry) -> Result<ArtifactSet, GenerationError> {
        self.check_regions(registry.templates())?;
        self.render(registry.templates(), registry.descriptors())
    }

    /// Render descriptors that are assumed valid; collisions still checked
    pub(crate) fn render(
        &self,
        templates: &CanonicalTemplates,
        descriptors: &[ModuleDescriptor],
    ) -> Result<ArtifactSet, GenerationError> {
        let mut seen: HashSet<(&str, Operation)> = HashSet::new();
        let mut artifacts = Vec::new();

        for descriptor in descriptors {
            for binding in bindings_for(descriptor) {
                let op = binding.operation;
                if !seen.insert((descriptor.key.as_str(), op)) {
                    return Err(GenerationError::ArtifactCollision {
                        module_key: descriptor.key.clone(),
                        operation: op,
                    });
                }

                let template = templates.for_operation(op);
                let rendered = apply(template, &self.rules, descriptor);
                let unmatched = rendered.unmatched();
                if self.strict && !unmatched.is_empty() {
                    return Err(GenerationError::UnmatchedPlaceholder {
                        module_key: descriptor.key.clone(),
                        operation: op,
                        placeholders: unmatched,
                    });
                }

                artifacts.push(GeneratedArtifact::new(
                    descriptor.key.as_str(),
                    binding,
                    rendered.text,
                    unmatched,
                ));
            }
        }

        Ok(ArtifactSet::new(artifacts))
    }

    fn check_regions(&self, templates: &CanonicalTemplates) -> Result<(), GenerationError> {
        for region in self.rules.regions() {
            let declared = templates.default_template().has_region(region)
                || templates.overrides().any(|(_, t)| t.has_region(region));
            if !declared {
                return Err(GenerationError::UnknownRegion {
                    region: region.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Build the rule set from `factory` and generate every artifact
pub fn generate(registry: &Registry, factory: &RuleFactory) -> Result<ArtifactSet, GenerationError> {
    Generator::from_factory(factory)?.generate(registry)
}
