//! Repository Implementations

mod lockfile;

pub use lockfile::{LockfileGuard, TomlLockfileRepository, LOCKFILE_NAME};
