//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Local file system with atomic writes
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

/// Write through a temp file in the target directory, then rename over
///
/// Readers see either the old or the new content, never a torn file.
pub fn atomic_write(path: &Path, content: &[u8]) -> FsResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
    temp.write_all(content).map_err(|e| FsError::at(path, e))?;
    temp.flush().map_err(|e| FsError::at(path, e))?;
    temp.persist(path).map_err(|e| FsError::at(path, e.error))?;
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        atomic_write(path, content.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_if_empty(&self, path: &Path) -> bool {
        std::fs::remove_dir(path).is_ok()
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        let bytes = std::fs::read(path).map_err(|e| FsError::at(path, e))?;
        Ok(ContentHash::of_bytes(&bytes))
    }
}
