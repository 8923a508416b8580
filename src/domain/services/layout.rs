//! Output layout
//!
//! Maps every artifact to a path relative to the output root. The default
//! pattern follows the Django app-template convention so a generated module
//! can be dropped into a project as-is.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{ArtifactSet, GeneratedArtifact};
use crate::domain::value_objects::Operation;

pub const DEFAULT_PATTERN: &str = "{key}/templates/{key}/{role}.html";

const LAYOUT_FIELDS: [&str; 2] = ["key", "role"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("output pattern is empty")]
    EmptyPattern,

    #[error("output pattern '{pattern}' uses unknown field '{{{field}}}' (expected {{key}} or {{role}})")]
    UnknownField { pattern: String, field: String },

    #[error("output pattern '{pattern}' escapes the output directory")]
    EscapesRoot { pattern: String },

    #[error("'{path}' is produced by both {first_key}:{first_operation} and {second_key}:{second_operation}")]
    Collision {
        path: String,
        first_key: String,
        first_operation: Operation,
        second_key: String,
        second_operation: Operation,
    },
}

/// An artifact together with where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<'a> {
    pub path: PathBuf,
    pub artifact: &'a GeneratedArtifact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pattern: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl Layout {
    pub fn new(pattern: impl Into<String>) -> Result<Self, LayoutError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(LayoutError::EmptyPattern);
        }
        if let Some(field) = unknown_field(&pattern) {
            return Err(LayoutError::UnknownField { pattern, field });
        }
        if !stays_inside_root(&pattern) {
            return Err(LayoutError::EscapesRoot { pattern });
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Relative path for one module operation
    pub fn path_for(&self, module_key: &str, operation: Operation) -> PathBuf {
        PathBuf::from(
            self.pattern
                .replace("{key}", module_key)
                .replace("{role}", operation.role()),
        )
    }

    /// Place every artifact, rejecting two artifacts on one path
    pub fn place<'a>(&self, artifacts: &'a ArtifactSet) -> Result<Vec<Placement<'a>>, LayoutError> {
        let mut taken: HashMap<PathBuf, &GeneratedArtifact> = HashMap::new();
        let mut placements = Vec::with_capacity(artifacts.len());

        for artifact in artifacts.artifacts() {
            let path = self.path_for(artifact.module_key(), artifact.operation());
            if let Some(first) = taken.get(&path) {
                return Err(LayoutError::Collision {
                    path: path.display().to_string(),
                    first_key: first.module_key().to_string(),
                    first_operation: first.operation(),
                    second_key: artifact.module_key().to_string(),
                    second_operation: artifact.operation(),
                });
            }
            taken.insert(path.clone(), artifact);
            placements.push(Placement { path, artifact });
        }

        Ok(placements)
    }
}

/// Whether a relative path joined to a root can only land below it
///
/// Rejects empty, absolute and drive-prefixed paths and any `..` segment,
/// with either separator.
pub fn stays_inside_root(path: &str) -> bool {
    !path.trim().is_empty()
        && !path.starts_with('/')
        && !path.starts_with('\\')
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.split(['/', '\\']).all(|segment| segment != "..")
}

fn unknown_field(pattern: &str) -> Option<String> {
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        let field = &after[..close];
        if !LAYOUT_FIELDS.contains(&field) {
            return Some(field.to_string());
        }
        rest = &after[close + 1..];
    }
    None
}
