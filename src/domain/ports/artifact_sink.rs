//! ArtifactSink port - destination of rendered artifacts
//!
//! Paths are relative to the sink's root. The sink reports current file
//! state for the planner and performs the writes the plan decided on.

use std::path::Path;

use super::file_system::FsResult;
use crate::domain::services::TargetFileState;

pub trait ArtifactSink {
    /// Current state of the file at `path`
    fn state(&self, path: &Path) -> TargetFileState;

    /// Current content, `None` if the file does not exist
    fn read(&self, path: &Path) -> FsResult<Option<String>>;

    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    fn remove(&self, path: &Path) -> FsResult<()>;
}

impl<T: ArtifactSink + ?Sized> ArtifactSink for &T {
    fn state(&self, path: &Path) -> TargetFileState {
        (**self).state(path)
    }

    fn read(&self, path: &Path) -> FsResult<Option<String>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        (**self).remove(path)
    }
}
