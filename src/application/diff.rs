//! Diff Use Case
//!
//! Shows what `generate` would change as unified diffs:
//! 1. Plan against the output tree (same as generate)
//! 2. For every write, diff current content against the rendered artifact
//! 3. For every orphan removal, diff current content against nothing
//!
//! Conflicts are included so a user can see what `--force` would discard.

use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::TextDiff;

use crate::domain::entities::ArtifactSet;
use crate::domain::ports::{ArtifactSink, LockfileRepository};
use crate::domain::services::{FileAction, Layout};
use crate::error::ScaffoldResult;

use super::generate::{GenerateOptions, GenerateUseCase};

/// Type of change for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// New file would be created
    Create,
    /// Existing generated file would be updated
    Update,
    /// File changed outside the generator; only `--force` writes it
    Conflict,
    /// Orphaned artifact would be deleted
    Remove,
}

/// One pending change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub path: PathBuf,
    pub change_type: ChangeType,
    /// Unified diff with `a/` and `b/` headers
    pub diff: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub entries: Vec<DiffEntry>,
    /// Files already up to date
    pub unchanged: usize,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.change_type == ChangeType::Conflict)
    }

    /// All diffs concatenated, in plan order
    pub fn to_patch(&self) -> String {
        self.entries.iter().map(|e| e.diff.as_str()).collect()
    }
}

/// Unified diff between two versions of `path`
pub fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}

pub struct DiffUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    inner: GenerateUseCase<LR, S>,
}

impl<LR, S> DiffUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    pub fn new(lockfile_repo: LR, sink: S) -> Self {
        Self {
            inner: GenerateUseCase::new(lockfile_repo, sink),
        }
    }

    /// Compute pending changes without modifying anything
    pub fn execute(
        &self,
        artifacts: &ArtifactSet,
        layout: &Layout,
        options: &GenerateOptions,
    ) -> ScaffoldResult<DiffResult> {
        let (_, plan) = self.inner.prepare(artifacts, layout, options)?;
        let sink = self.inner.sink();
        let mut result = DiffResult::default();

        for file in &plan.files {
            let current = sink.read(&file.path)?;
            let change_type = match (file.action, &current) {
                (FileAction::Skip, _) => {
                    result.unchanged += 1;
                    continue;
                }
                (FileAction::Conflict(_), _) => ChangeType::Conflict,
                (FileAction::Write, None) => ChangeType::Create,
                (FileAction::Write, Some(_)) => ChangeType::Update,
            };
            let old = current.unwrap_or_default();
            result.entries.push(DiffEntry {
                diff: unified_diff(&file.path, &old, &file.content),
                path: file.path.clone(),
                change_type,
            });
        }

        for orphan in plan.to_remove() {
            let old = sink.read(&orphan.path)?.unwrap_or_default();
            result.entries.push(DiffEntry {
                diff: unified_diff(&orphan.path, &old, ""),
                path: orphan.path.clone(),
                change_type: ChangeType::Remove,
            });
        }

        Ok(result)
    }
}
