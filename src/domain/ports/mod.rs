//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_sink;
pub mod file_system;
pub mod lockfile_repository;
pub mod template_source;

pub use artifact_sink::ArtifactSink;
pub use file_system::{FileSystem, FsError, FsResult};
pub use lockfile_repository::{LockfileError, LockfileRepository, LockfileResult};
pub use template_source::TemplateSource;
