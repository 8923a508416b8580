//! Infrastructure Layer
//!
//! Concrete implementations of domain ports. All I/O lives here.
//!
//! - `fs/` - local file system, output directory sink, template source
//! - `repositories/` - TOML lockfile

pub mod fs;
pub mod repositories;

pub use fs::{DirectorySink, FsTemplateSource, LocalFs};
pub use repositories::{LockfileGuard, TomlLockfileRepository, LOCKFILE_NAME};
