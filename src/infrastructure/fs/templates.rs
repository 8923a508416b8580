//! Filesystem template source
//!
//! Template names from the configuration are paths relative to the
//! directory holding the configuration file.

use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, FsResult, TemplateSource};

use super::LocalFs;

#[derive(Debug, Clone)]
pub struct FsTemplateSource<F: FileSystem = LocalFs> {
    fs: F,
    base_dir: PathBuf,
}

impl FsTemplateSource<LocalFs> {
    pub fn local(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(LocalFs::new(), base_dir)
    }
}

impl<F: FileSystem> FsTemplateSource<F> {
    pub fn new(fs: F, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            base_dir: base_dir.into(),
        }
    }

    /// Absolute (or base-relative) location of a template
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl<F: FileSystem> TemplateSource for FsTemplateSource<F> {
    fn load(&self, name: &str) -> FsResult<String> {
        self.fs.read(&self.resolve(name))
    }
}
