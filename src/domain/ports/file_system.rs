//! FileSystem port - abstraction over file I/O operations
//!
//! Lets the application layer read templates and write artifacts without
//! depending on a concrete implementation (local disk, in-memory for tests).

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::ContentHash;

pub type FsResult<T> = Result<T, FsError>;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Attach the path an `io::Error` happened on
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// Abstract file system interface
pub trait FileSystem {
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Remove `path` if it is an empty directory; true when removed
    fn remove_dir_if_empty(&self, path: &Path) -> bool;

    /// SHA-256 of the file content
    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        self.read(path).map(|content| ContentHash::of(&content))
    }
}
