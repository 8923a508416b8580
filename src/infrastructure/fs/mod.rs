//! File System Implementations
//!
//! Concrete implementations of the FileSystem, ArtifactSink and
//! TemplateSource ports.

mod directory;
mod local;
mod templates;

pub use directory::DirectorySink;
pub use local::{atomic_write, LocalFs};
pub use templates::FsTemplateSource;
