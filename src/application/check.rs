//! Check Use Case
//!
//! Reports drift between the output tree and what `generate` would write,
//! without touching anything. A clean check means the next generation is a
//! no-op.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::domain::entities::ArtifactSet;
use crate::domain::ports::{ArtifactSink, LockfileRepository};
use crate::domain::services::{ConflictReason, FileAction, Layout, OrphanAction};
use crate::error::ScaffoldResult;

use super::generate::{GenerateOptions, GenerateUseCase};

/// How one file differs from the generated output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    /// Not generated yet
    Missing,
    /// Generated earlier from older inputs
    Stale,
    /// Edited since the last generation
    Modified,
    /// Present but never written by the generator
    Untracked,
    /// No longer generated; unmodified, would be removed
    Orphaned,
    /// No longer generated and edited by hand
    EditedOrphan,
}

impl DriftStatus {
    /// Whether `generate` without `--force` would refuse to run
    pub fn blocks_generation(&self) -> bool {
        matches!(self, DriftStatus::Modified | DriftStatus::Untracked)
    }
}

impl std::fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DriftStatus::Missing => "missing",
            DriftStatus::Stale => "stale",
            DriftStatus::Modified => "modified",
            DriftStatus::Untracked => "untracked",
            DriftStatus::Orphaned => "orphaned",
            DriftStatus::EditedOrphan => "edited orphan",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub path: PathBuf,
    pub status: DriftStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Drifted files, generated paths first then orphans
    pub items: Vec<CheckItem>,
    /// Files already matching the generated output
    pub up_to_date: usize,
    pub artifact_count: usize,
}

impl CheckResult {
    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, status: DriftStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }
}

/// Check Use Case
///
/// Shares planning with `GenerateUseCase`; never writes.
pub struct CheckUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    inner: GenerateUseCase<LR, S>,
}

impl<LR, S> CheckUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    pub fn new(lockfile_repo: LR, sink: S) -> Self {
        Self {
            inner: GenerateUseCase::new(lockfile_repo, sink),
        }
    }

    pub fn execute(
        &self,
        artifacts: &ArtifactSet,
        layout: &Layout,
        options: &GenerateOptions,
    ) -> ScaffoldResult<CheckResult> {
        let (_, plan) = self.inner.prepare(artifacts, layout, options)?;
        let mut result = CheckResult {
            artifact_count: artifacts.len(),
            ..Default::default()
        };

        for file in &plan.files {
            let status = match file.action {
                FileAction::Skip => {
                    result.up_to_date += 1;
                    continue;
                }
                FileAction::Write if self.inner.sink().state(&file.path).exists => {
                    DriftStatus::Stale
                }
                FileAction::Write => DriftStatus::Missing,
                FileAction::Conflict(ConflictReason::Modified) => DriftStatus::Modified,
                FileAction::Conflict(ConflictReason::Untracked) => DriftStatus::Untracked,
            };
            result.items.push(CheckItem {
                path: file.path.clone(),
                status,
            });
        }

        for orphan in &plan.orphans {
            let status = match orphan.action {
                OrphanAction::Remove => DriftStatus::Orphaned,
                OrphanAction::Keep => DriftStatus::EditedOrphan,
                OrphanAction::Forget => continue,
            };
            result.items.push(CheckItem {
                path: orphan.path.clone(),
                status,
            });
        }

        info!(
            drifted = result.items.len(),
            up_to_date = result.up_to_date,
            "check complete"
        );
        Ok(result)
    }
}
