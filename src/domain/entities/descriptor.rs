//! ModuleDescriptor entity - one pluggable hospital department
//!
//! Descriptors are plain data until they pass registry validation; see
//! [`Registry::register`](super::Registry::register).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Operation;

/// Declarative description of one department module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique url-namespace-safe identifier (`dental`)
    pub key: String,
    /// Display name (`Dental`)
    pub title: String,
    /// Opaque icon identifier (`fas fa-tooth`)
    #[serde(rename = "icon")]
    pub icon_token: String,
    /// Palette member (`info`)
    #[serde(rename = "color")]
    pub color_token: String,
    /// Free text used in generated copy (`pacientes dentales`)
    #[serde(default)]
    pub description: String,
    /// Operations the module exposes
    #[serde(default)]
    pub capabilities: BTreeSet<Operation>,
}

impl ModuleDescriptor {
    /// Create a descriptor with no icon, color, description or capabilities
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            icon_token: String::new(),
            color_token: String::new(),
            description: String::new(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_token = icon.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_token = color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_capabilities(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.capabilities = ops.into_iter().collect();
        self
    }

    /// Grant the full seven-operation set
    pub fn with_all_capabilities(self) -> Self {
        self.with_capabilities(Operation::ALL)
    }

    pub fn supports(&self, op: Operation) -> bool {
        self.capabilities.contains(&op)
    }
}

/// Check that a key is url-namespace safe: `[a-z][a-z0-9_]*`
pub fn is_valid_module_key(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
