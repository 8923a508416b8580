//! Registry entity
//!
//! Owns the validated module descriptors and the canonical templates they
//! are rendered from. Registration order is preserved and drives the order
//! in which artifacts and routes are enumerated.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::value_objects::{Operation, Palette};

use super::descriptor::{is_valid_module_key, ModuleDescriptor};
use super::template::CanonicalTemplate;

/// Reasons a descriptor is refused by the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("module key '{key}' is already registered")]
    DuplicateKey { key: String },

    #[error("module '{key}': color '{color}' is not in the palette ({palette})")]
    UnknownColorToken {
        key: String,
        color: String,
        palette: String,
    },

    #[error("module '{key}' declares no capabilities")]
    EmptyCapabilitySet { key: String },

    #[error("module key '{key}' is not url-safe (expected [a-z][a-z0-9_]*)")]
    InvalidKey { key: String },
}

impl ValidationError {
    /// Key of the descriptor that failed
    pub fn key(&self) -> &str {
        match self {
            ValidationError::DuplicateKey { key }
            | ValidationError::UnknownColorToken { key, .. }
            | ValidationError::EmptyCapabilitySet { key }
            | ValidationError::InvalidKey { key } => key,
        }
    }
}

/// Canonical template set: a default document plus optional per-role overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTemplates {
    default: CanonicalTemplate,
    per_operation: BTreeMap<Operation, CanonicalTemplate>,
}

impl CanonicalTemplates {
    pub fn new(default: CanonicalTemplate) -> Self {
        Self {
            default,
            per_operation: BTreeMap::new(),
        }
    }

    /// Use a dedicated template for one operation
    pub fn with_override(mut self, op: Operation, template: CanonicalTemplate) -> Self {
        self.per_operation.insert(op, template);
        self
    }

    /// Template an operation renders from
    pub fn for_operation(&self, op: Operation) -> &CanonicalTemplate {
        self.per_operation.get(&op).unwrap_or(&self.default)
    }

    pub fn default_template(&self) -> &CanonicalTemplate {
        &self.default
    }

    pub fn overrides(&self) -> impl Iterator<Item = (Operation, &CanonicalTemplate)> {
        self.per_operation.iter().map(|(op, t)| (*op, t))
    }
}

/// Validated, ordered collection of module descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    palette: Palette,
    templates: CanonicalTemplates,
    modules: Vec<ModuleDescriptor>,
}

impl Registry {
    pub fn new(palette: Palette, templates: CanonicalTemplates) -> Self {
        Self {
            palette,
            templates,
            modules: Vec::new(),
        }
    }

    /// Validate a descriptor without registering it
    pub fn validate(&self, descriptor: &ModuleDescriptor) -> Result<(), ValidationError> {
        if !is_valid_module_key(&descriptor.key) {
            return Err(ValidationError::InvalidKey {
                key: descriptor.key.clone(),
            });
        }
        if self.contains(&descriptor.key) {
            return Err(ValidationError::DuplicateKey {
                key: descriptor.key.clone(),
            });
        }
        if !self.palette.contains(&descriptor.color_token) {
            return Err(ValidationError::UnknownColorToken {
                key: descriptor.key.clone(),
                color: descriptor.color_token.clone(),
                palette: self.palette.tokens().join(", "),
            });
        }
        if descriptor.capabilities.is_empty() {
            return Err(ValidationError::EmptyCapabilitySet {
                key: descriptor.key.clone(),
            });
        }
        Ok(())
    }

    /// Validate and append a descriptor
    ///
    /// On failure the registry is unchanged.
    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Result<(), ValidationError> {
        self.validate(&descriptor)?;
        self.modules.push(descriptor);
        Ok(())
    }

    /// Register a batch all-or-nothing
    ///
    /// Every failure in the batch is reported (duplicates inside the batch
    /// included); the registry only changes when the whole batch is valid.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<(), Vec<ValidationError>> {
        let mut staged = self.clone();
        let mut errors = Vec::new();
        for descriptor in descriptors {
            if let Err(e) = staged.register(descriptor) {
                errors.push(e);
            }
        }
        if errors.is_empty() {
            self.modules = staged.modules;
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.iter().any(|m| m.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn templates(&self) -> &CanonicalTemplates {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
