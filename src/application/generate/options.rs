//! Generate Options

use std::path::PathBuf;

/// Options for the generate use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Lockfile recording what the last run wrote
    pub lockfile_path: PathBuf,
    /// Overwrite files changed outside the generator
    pub force: bool,
    /// Plan only; touch nothing
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(lockfile_path: impl Into<PathBuf>) -> Self {
        Self {
            lockfile_path: lockfile_path.into(),
            force: false,
            dry_run: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
