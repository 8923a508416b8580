//! Output directory sink
//!
//! Implements the ArtifactSink port on top of any FileSystem, rooted at the
//! configured output directory.

use std::path::{Path, PathBuf};

use crate::domain::ports::{ArtifactSink, FileSystem, FsResult};
use crate::domain::services::TargetFileState;

use super::LocalFs;

#[derive(Debug, Clone)]
pub struct DirectorySink<F: FileSystem = LocalFs> {
    fs: F,
    root: PathBuf,
}

impl DirectorySink<LocalFs> {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(LocalFs::new(), root)
    }
}

impl<F: FileSystem> DirectorySink<F> {
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl<F: FileSystem> ArtifactSink for DirectorySink<F> {
    fn state(&self, path: &Path) -> TargetFileState {
        let full = self.resolve(path);
        if !self.fs.exists(&full) {
            return TargetFileState::not_exists();
        }
        TargetFileState {
            exists: true,
            current_hash: self.fs.hash(&full).ok(),
        }
    }

    fn read(&self, path: &Path) -> FsResult<Option<String>> {
        match self.fs.read(&self.resolve(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.fs.write(&self.resolve(path), content)
    }

    /// Delete the file and any directories it leaves empty below the root
    fn remove(&self, path: &Path) -> FsResult<()> {
        self.fs.remove(&self.resolve(path))?;
        let mut dir = path.parent();
        while let Some(d) = dir {
            if d.as_os_str().is_empty() || !self.fs.remove_dir_if_empty(&self.resolve(d)) {
                break;
            }
            dir = d.parent();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ContentHash;
    use tempfile::tempdir;

    #[test]
    fn state_of_missing_file() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::local(dir.path());
        assert_eq!(
            sink.state(Path::new("dental/dashboard.html")),
            TargetFileState::not_exists()
        );
    }

    #[test]
    fn write_then_state_reports_hash() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::local(dir.path());
        let path = Path::new("dental/dashboard.html");

        sink.write(path, "<h1>Dental</h1>").unwrap();

        assert!(dir.path().join(path).exists());
        assert_eq!(
            sink.state(path),
            TargetFileState::exists_with_hash(ContentHash::of("<h1>Dental</h1>"))
        );
    }

    #[test]
    fn read_missing_is_none() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::local(dir.path());
        assert_eq!(sink.read(Path::new("x.html")).unwrap(), None);
    }

    #[test]
    fn remove_prunes_empty_dirs_but_not_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("out");
        let sink = DirectorySink::local(&root);
        let path = Path::new("dental/templates/dental/list.html");
        sink.write(path, "x").unwrap();

        sink.remove(path).unwrap();

        assert!(!root.join("dental").exists());
        assert!(root.exists());
    }

    #[test]
    fn remove_keeps_siblings() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::local(dir.path());
        sink.write(Path::new("dental/a.html"), "a").unwrap();
        sink.write(Path::new("dental/b.html"), "b").unwrap();

        sink.remove(Path::new("dental/a.html")).unwrap();

        assert!(dir.path().join("dental/b.html").exists());
    }
}
