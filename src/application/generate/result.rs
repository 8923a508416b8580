//! Generate Result

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::Operation;

/// A file the run refused to overwrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Placeholders that matched nothing in one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedEntry {
    pub module: String,
    pub operation: Operation,
    pub placeholders: Vec<String>,
}

/// Result of a generate run
///
/// In a dry run `written` and `removed` list what would happen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateResult {
    /// Files written (created or updated)
    pub written: Vec<PathBuf>,
    /// Files already up to date
    pub skipped: Vec<PathBuf>,
    /// Orphaned artifacts deleted
    pub removed: Vec<PathBuf>,
    /// Orphaned artifacts left in place because they were edited
    pub kept_orphans: Vec<PathBuf>,
    /// Files blocking the run; when non-empty nothing was written
    pub conflicts: Vec<ConflictEntry>,
    pub unmatched: Vec<UnmatchedEntry>,
    pub artifact_count: usize,
    pub lockfile_updated: bool,
    pub dry_run: bool,
}

impl GenerateResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || !self.removed.is_empty()
    }
}
