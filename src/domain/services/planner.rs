//! Write planning service
//!
//! Decides, per output file, whether regeneration may write it, can leave it
//! alone, or would clobber something a person changed. Also decides what to
//! do with files the lockfile tracks that are no longer generated. No I/O
//! happens here; the caller supplies the on-disk state.

use std::path::PathBuf;

use crate::domain::entities::{GeneratedArtifact, Lockfile, LockfileEntry};
use crate::domain::value_objects::{ContentHash, Operation};

/// The action to take for a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Write the file (new or safe update)
    Write,
    /// Already byte-identical
    Skip,
    /// Would overwrite content we do not own
    Conflict(ConflictReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Edited since the last generation
    Modified,
    /// Exists but was never written by the generator
    Untracked,
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictReason::Modified => write!(f, "modified since last generation"),
            ConflictReason::Untracked => write!(f, "not created by hms-scaffold"),
        }
    }
}

/// What to do with a tracked file that is no longer generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanAction {
    /// Unmodified since we wrote it: delete
    Remove,
    /// Already gone: drop the lockfile entry
    Forget,
    /// Edited by hand: leave the file and report it
    Keep,
}

/// A planned action for a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    pub lock_key: String,
    pub content: String,
    pub hash: ContentHash,
    pub module: String,
    pub operation: Operation,
    pub action: FileAction,
}

impl PlannedFile {
    pub fn new(path: PathBuf, artifact: &GeneratedArtifact, action: FileAction) -> Self {
        Self {
            lock_key: crate::domain::entities::lockfile_key(&path),
            path,
            content: artifact.content().to_string(),
            hash: artifact.hash().clone(),
            module: artifact.module_key().to_string(),
            operation: artifact.operation(),
            action,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self.action, FileAction::Conflict(_))
    }

    pub fn should_write(&self) -> bool {
        matches!(self.action, FileAction::Write)
    }

    pub fn should_skip(&self) -> bool {
        matches!(self.action, FileAction::Skip)
    }

    /// Convert conflict to write (for `--force`)
    pub fn resolve_overwrite(mut self) -> Self {
        if let FileAction::Conflict(_) = self.action {
            self.action = FileAction::Write;
        }
        self
    }

    fn lock_entry(&self) -> LockfileEntry {
        LockfileEntry {
            hash: self.hash.clone(),
            module: self.module.clone(),
            operation: self.operation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOrphan {
    pub path: PathBuf,
    pub lock_key: String,
    pub action: OrphanAction,
}

/// Result of planning one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub files: Vec<PlannedFile>,
    pub orphans: Vec<PlannedOrphan>,
}

impl SyncPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: PlannedFile) {
        self.files.push(file);
    }

    pub fn add_orphan(&mut self, orphan: PlannedOrphan) {
        self.orphans.push(orphan);
    }

    pub fn has_conflicts(&self) -> bool {
        self.files.iter().any(|f| f.is_conflict())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.is_conflict())
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts().count()
    }

    pub fn to_write(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.should_write())
    }

    pub fn write_count(&self) -> usize {
        self.to_write().count()
    }

    pub fn skip_count(&self) -> usize {
        self.files.iter().filter(|f| f.should_skip()).count()
    }

    pub fn to_remove(&self) -> impl Iterator<Item = &PlannedOrphan> {
        self.orphans
            .iter()
            .filter(|o| o.action == OrphanAction::Remove)
    }

    pub fn remove_count(&self) -> usize {
        self.to_remove().count()
    }

    pub fn kept_orphans(&self) -> impl Iterator<Item = &PlannedOrphan> {
        self.orphans.iter().filter(|o| o.action == OrphanAction::Keep)
    }

    /// True when applying the plan would touch no file at all
    pub fn is_noop(&self) -> bool {
        self.write_count() == 0 && self.remove_count() == 0 && !self.has_conflicts()
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// Apply "overwrite all" - resolve every conflict to a write
    pub fn overwrite_all(mut self) -> Self {
        self.files = self
            .files
            .into_iter()
            .map(|f| f.resolve_overwrite())
            .collect();
        self
    }

    /// Lockfile describing the output tree once the plan has been applied
    ///
    /// Files still in conflict keep their previous entry, if any; kept
    /// orphans stay tracked so they are reported again next run.
    pub fn next_lockfile(&self, previous: &Lockfile) -> Lockfile {
        let mut next = Lockfile::new();
        for file in &self.files {
            match file.action {
                FileAction::Write | FileAction::Skip => {
                    next.insert(file.lock_key.clone(), file.lock_entry());
                }
                FileAction::Conflict(_) => {
                    if let Some(entry) = previous.get(&file.lock_key) {
                        next.insert(file.lock_key.clone(), entry.clone());
                    }
                }
            }
        }
        for orphan in self.kept_orphans() {
            if let Some(entry) = previous.get(&orphan.lock_key) {
                next.insert(orphan.lock_key.clone(), entry.clone());
            }
        }
        next
    }
}

/// Information about a target file's current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFileState {
    pub exists: bool,
    /// Current file hash (if exists and readable)
    pub current_hash: Option<ContentHash>,
}

impl TargetFileState {
    pub fn not_exists() -> Self {
        Self {
            exists: false,
            current_hash: None,
        }
    }

    pub fn exists_with_hash(hash: ContentHash) -> Self {
        Self {
            exists: true,
            current_hash: Some(hash),
        }
    }
}

/// Pure planning service
pub struct Planner;

impl Planner {
    /// Plan one generated file
    pub fn plan_file(
        new_hash: &ContentHash,
        target_state: &TargetFileState,
        lockfile: &Lockfile,
        lock_key: &str,
    ) -> FileAction {
        if !target_state.exists {
            return FileAction::Write;
        }

        let Some(current) = &target_state.current_hash else {
            // Exists but unreadable
            return FileAction::Conflict(ConflictReason::Untracked);
        };

        if current == new_hash {
            return FileAction::Skip;
        }

        match lockfile.hash_of(lock_key) {
            Some(recorded) if recorded == current => FileAction::Write,
            Some(_) => FileAction::Conflict(ConflictReason::Modified),
            None => FileAction::Conflict(ConflictReason::Untracked),
        }
    }

    /// Plan a tracked file that the current run no longer produces
    pub fn plan_orphan(
        target_state: &TargetFileState,
        lockfile: &Lockfile,
        lock_key: &str,
    ) -> OrphanAction {
        if !target_state.exists {
            return OrphanAction::Forget;
        }
        match (&target_state.current_hash, lockfile.hash_of(lock_key)) {
            (Some(current), Some(recorded)) if current == recorded => OrphanAction::Remove,
            _ => OrphanAction::Keep,
        }
    }

    /// Lockfile keys not produced by this run, sorted
    pub fn orphan_keys<'a>(lockfile: &'a Lockfile, planned: &[PlannedFile]) -> Vec<&'a str> {
        lockfile
            .keys()
            .filter(|key| !planned.iter().any(|f| f.lock_key == *key))
            .collect()
    }
}
