//! LockfileRepository port - abstraction for lockfile persistence
//!
//! The domain only sees [`Lockfile`]; the on-disk format is an
//! infrastructure concern.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::Lockfile;

pub type LockfileResult<T> = Result<T, LockfileError>;

#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("lockfile {} has version {found}, expected {expected}", path.display())]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("lockfile {} tracks '{key}', which is outside the output directory", path.display())]
    UnsafeKey { path: PathBuf, key: String },

    #[error("invalid lockfile {}: {message}", path.display())]
    InvalidFormat { path: PathBuf, message: String },

    #[error("lockfile I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait LockfileRepository {
    /// Load the lockfile; a missing file is an empty lockfile
    fn load(&self, path: &Path) -> LockfileResult<Lockfile>;

    /// Persist the lockfile; an empty lockfile removes the file
    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()>;
}

impl<T: LockfileRepository + ?Sized> LockfileRepository for &T {
    fn load(&self, path: &Path) -> LockfileResult<Lockfile> {
        (**self).load(path)
    }

    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()> {
        (**self).save(lockfile, path)
    }
}
