//! Error types for hms-scaffold
//!
//! Each domain component has its own `thiserror` enum; `ScaffoldError` wraps
//! them for the application layer and the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::{TemplateError, ValidationError};
use crate::domain::ports::{FsError, LockfileError};
use crate::domain::services::{GenerationError, LayoutError, RuleSetError};

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// One or more descriptors were rejected; nothing was registered
    #[error("{} invalid module descriptor(s): {}", .0.len(), join(.0))]
    Validation(Vec<ValidationError>),

    #[error("invalid substitution rules: {0}")]
    RuleSet(#[from] RuleSetError),

    #[error("invalid template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    #[error("configuration file not found: {} (run `hms-scaffold init`)", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("refusing to overwrite {count} file(s) changed outside hms-scaffold (use --force)")]
    Conflicts { count: usize },

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl From<Vec<ValidationError>> for ScaffoldError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScaffoldError::Validation(errors)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
