//! Generate Use Case
//!
//! Orchestrates one run:
//! 1. Render the artifact set (pure)
//! 2. Place artifacts on output paths
//! 3. Plan against the output tree and the lockfile
//! 4. Write, prune orphans, update the lockfile
//!
//! A run with unresolved conflicts writes nothing. The lockfile is saved
//! only when its content changes, so a no-op regeneration touches no file.

use tracing::{debug, info, warn};

use crate::application::project::Project;
use crate::domain::entities::{key_to_path, lockfile_key, ArtifactSet, Lockfile};
use crate::domain::ports::{ArtifactSink, LockfileRepository};
use crate::domain::services::{
    stays_inside_root, FileAction, Layout, Placement, PlannedFile, PlannedOrphan, Planner,
    SyncPlan,
};
use crate::error::ScaffoldResult;
use crate::infrastructure::{DirectorySink, TomlLockfileRepository};

use super::options::GenerateOptions;
use super::result::{ConflictEntry, GenerateResult, UnmatchedEntry};

/// Generate use case, parameterized by its ports
pub struct GenerateUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    lockfile_repo: LR,
    sink: S,
}

impl GenerateUseCase<TomlLockfileRepository, DirectorySink> {
    /// Filesystem-backed use case writing into the project's output directory
    pub fn local(project: &Project) -> Self {
        Self::new(
            TomlLockfileRepository::new(),
            DirectorySink::local(project.output_dir()),
        )
    }
}

impl<LR, S> GenerateUseCase<LR, S>
where
    LR: LockfileRepository,
    S: ArtifactSink,
{
    pub fn new(lockfile_repo: LR, sink: S) -> Self {
        Self {
            lockfile_repo,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn lockfile_repo(&self) -> &LR {
        &self.lockfile_repo
    }

    /// Render the project and apply it to the output tree
    pub fn execute(
        &self,
        project: &Project,
        options: &GenerateOptions,
    ) -> ScaffoldResult<GenerateResult> {
        let artifacts = project.generate()?;
        self.execute_artifacts(&artifacts, project.layout(), options)
    }

    /// Apply an already-rendered artifact set
    pub fn execute_artifacts(
        &self,
        artifacts: &ArtifactSet,
        layout: &Layout,
        options: &GenerateOptions,
    ) -> ScaffoldResult<GenerateResult> {
        let mut result = GenerateResult::new();
        result.artifact_count = artifacts.len();
        result.dry_run = options.dry_run;
        result.unmatched = unmatched_entries(artifacts);

        let (lockfile, mut plan) = self.prepare(artifacts, layout, options)?;

        if options.force && plan.has_conflicts() {
            warn!(
                count = plan.conflict_count(),
                "overwriting files changed outside hms-scaffold"
            );
            plan = plan.overwrite_all();
        }

        result.skipped = plan
            .files
            .iter()
            .filter(|f| f.should_skip())
            .map(|f| f.path.clone())
            .collect();
        result.kept_orphans = plan.kept_orphans().map(|o| o.path.clone()).collect();
        for path in &result.kept_orphans {
            warn!(path = %path.display(), "orphaned artifact was edited; leaving it in place");
        }

        if plan.has_conflicts() {
            result.conflicts = conflict_entries(&plan);
            for c in &result.conflicts {
                warn!(path = %c.path.display(), reason = %c.reason, "conflict");
            }
            return Ok(result);
        }

        result.written = plan.to_write().map(|f| f.path.clone()).collect();
        result.removed = plan.to_remove().map(|o| o.path.clone()).collect();

        if options.dry_run {
            info!(
                would_write = result.written.len(),
                would_remove = result.removed.len(),
                "dry run; nothing written"
            );
            return Ok(result);
        }

        for file in plan.to_write() {
            self.sink.write(&file.path, &file.content)?;
            debug!(path = %file.path.display(), "wrote");
        }
        for orphan in plan.to_remove() {
            self.sink.remove(&orphan.path)?;
            debug!(path = %orphan.path.display(), "removed orphan");
        }

        let next = plan.next_lockfile(&lockfile);
        if next != lockfile {
            self.lockfile_repo.save(&next, &options.lockfile_path)?;
            result.lockfile_updated = true;
        }

        info!(
            written = result.written.len(),
            skipped = result.skipped.len(),
            removed = result.removed.len(),
            "generation complete"
        );
        Ok(result)
    }

    /// Load the lockfile and plan every placement without touching anything
    pub fn prepare(
        &self,
        artifacts: &ArtifactSet,
        layout: &Layout,
        options: &GenerateOptions,
    ) -> ScaffoldResult<(Lockfile, SyncPlan)> {
        let placements = layout.place(artifacts)?;
        let lockfile = self.lockfile_repo.load(&options.lockfile_path)?;
        let plan = self.plan(&placements, &lockfile);
        Ok((lockfile, plan))
    }

    /// Plan each placement and each tracked file no longer generated
    pub fn plan(&self, placements: &[Placement<'_>], lockfile: &Lockfile) -> SyncPlan {
        let mut plan = SyncPlan::new();

        for placement in placements {
            let key = lockfile_key(&placement.path);
            let state = self.sink.state(&placement.path);
            let action = Planner::plan_file(placement.artifact.hash(), &state, lockfile, &key);
            debug!(path = %placement.path.display(), ?action, "planned");
            plan.add(PlannedFile::new(
                placement.path.clone(),
                placement.artifact,
                action,
            ));
        }

        let orphan_keys = Planner::orphan_keys(lockfile, &plan.files);
        for key in orphan_keys {
            if !stays_inside_root(key) {
                warn!(key, "lockfile entry outside the output directory; ignoring it");
                continue;
            }
            let path = key_to_path(key);
            let state = self.sink.state(&path);
            let action = Planner::plan_orphan(&state, lockfile, key);
            debug!(path = %path.display(), ?action, "orphan");
            plan.add_orphan(PlannedOrphan {
                path,
                lock_key: key.to_string(),
                action,
            });
        }

        plan
    }
}

fn unmatched_entries(artifacts: &ArtifactSet) -> Vec<UnmatchedEntry> {
    artifacts
        .artifacts()
        .iter()
        .filter(|a| !a.unmatched_placeholders().is_empty())
        .map(|a| UnmatchedEntry {
            module: a.module_key().to_string(),
            operation: a.operation(),
            placeholders: a.unmatched_placeholders().to_vec(),
        })
        .collect()
}

fn conflict_entries(plan: &SyncPlan) -> Vec<ConflictEntry> {
    plan.files
        .iter()
        .filter_map(|f| match f.action {
            FileAction::Conflict(reason) => Some(ConflictEntry {
                path: f.path.clone(),
                reason: reason.to_string(),
            }),
            _ => None,
        })
        .collect()
}
