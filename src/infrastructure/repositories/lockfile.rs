//! TOML Lockfile Repository
//!
//! Stores the lockfile as `hms-scaffold.lock`:
//!
//! ```toml
//! version = 1
//!
//! [files."dental/templates/dental/dashboard.html"]
//! hash = "sha256:..."
//! module = "dental"
//! operation = "dashboard"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Lockfile, LockfileEntry};
use crate::domain::ports::{FileSystem, LockfileError, LockfileRepository, LockfileResult};
use crate::domain::services::stays_inside_root;
use crate::domain::value_objects::{ContentHash, Operation};
use crate::infrastructure::fs::LocalFs;

pub const LOCKFILE_NAME: &str = "hms-scaffold.lock";

pub struct TomlLockfileRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl TomlLockfileRepository<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlLockfileRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> TomlLockfileRepository<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

/// Exclusive advisory lock held for one read-modify-write cycle
///
/// Released on drop.
#[derive(Debug)]
pub struct LockfileGuard {
    file: fs::File,
    path: PathBuf,
}

impl LockfileGuard {
    /// Block until no other process holds the lock for `lockfile`
    pub fn acquire(lockfile: &Path) -> LockfileResult<Self> {
        let path = guard_path(lockfile);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LockfileError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockfileError::Io {
                path: path.clone(),
                source,
            })?;
        file.lock_exclusive().map_err(|source| LockfileError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockfileGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn guard_path(lockfile: &Path) -> PathBuf {
    let mut name = lockfile.as_os_str().to_owned();
    name.push(".lck");
    PathBuf::from(name)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFileEntry {
    hash: ContentHash,
    module: String,
    operation: Operation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLockfile {
    version: u32,
    #[serde(default)]
    files: BTreeMap<String, TomlFileEntry>,
}

impl<F: FileSystem> LockfileRepository for TomlLockfileRepository<F> {
    fn load(&self, path: &Path) -> LockfileResult<Lockfile> {
        if !self.fs.exists(path) {
            return Ok(Lockfile::new());
        }

        let content = self.fs.read(path).map_err(|e| LockfileError::InvalidFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let parsed: TomlLockfile =
            toml::from_str(&content).map_err(|e| LockfileError::InvalidFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if parsed.version != Lockfile::VERSION {
            return Err(LockfileError::VersionMismatch {
                path: path.to_path_buf(),
                found: parsed.version,
                expected: Lockfile::VERSION,
            });
        }

        let mut lockfile = Lockfile::new();
        for (key, entry) in parsed.files {
            if !stays_inside_root(&key) {
                return Err(LockfileError::UnsafeKey {
                    path: path.to_path_buf(),
                    key,
                });
            }
            lockfile.insert(
                key,
                LockfileEntry {
                    hash: entry.hash,
                    module: entry.module,
                    operation: entry.operation,
                },
            );
        }
        Ok(lockfile)
    }

    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()> {
        if lockfile.is_empty() {
            if self.fs.exists(path) {
                self.fs.remove(path).map_err(|e| LockfileError::InvalidFormat {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
            return Ok(());
        }

        let files = lockfile
            .entries()
            .map(|(key, entry)| {
                (
                    key.to_string(),
                    TomlFileEntry {
                        hash: entry.hash.clone(),
                        module: entry.module.clone(),
                        operation: entry.operation,
                    },
                )
            })
            .collect();
        let doc = TomlLockfile {
            version: lockfile.version(),
            files,
        };

        let content = toml::to_string_pretty(&doc).map_err(|e| LockfileError::InvalidFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.fs
            .write(path, &content)
            .map_err(|e| LockfileError::InvalidFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Lockfile {
        let mut lock = Lockfile::new();
        lock.insert(
            "dental/templates/dental/dashboard.html",
            LockfileEntry {
                hash: ContentHash::of("<h1>Dental</h1>"),
                module: "dental".to_string(),
                operation: Operation::Dashboard,
            },
        );
        lock
    }

    #[test]
    fn missing_lockfile_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = TomlLockfileRepository::new();
        assert!(repo.load(&dir.path().join(LOCKFILE_NAME)).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        let repo = TomlLockfileRepository::new();

        repo.save(&sample(), &path).unwrap();

        assert_eq!(repo.load(&path).unwrap(), sample());
    }

    #[test]
    fn saved_format_is_readable_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        TomlLockfileRepository::new().save(&sample(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("version = 1"));
        assert!(content.contains("[files.\"dental/templates/dental/dashboard.html\"]"));
        assert!(content.contains("operation = \"dashboard\""));
    }

    #[test]
    fn saving_empty_lockfile_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        let repo = TomlLockfileRepository::new();
        repo.save(&sample(), &path).unwrap();

        repo.save(&Lockfile::new(), &path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn version_mismatch_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        std::fs::write(&path, "version = 99\n").unwrap();

        let err = TomlLockfileRepository::new().load(&path).unwrap_err();

        assert!(matches!(
            err,
            LockfileError::VersionMismatch {
                found: 99,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn key_outside_output_dir_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        std::fs::write(
            &path,
            format!(
                "version = 1\n\n[files.\"../victim.txt\"]\nhash = \"{}\"\nmodule = \"dental\"\noperation = \"dashboard\"\n",
                ContentHash::of("victim")
            ),
        )
        .unwrap();

        let err = TomlLockfileRepository::new().load(&path).unwrap_err();

        assert!(matches!(err, LockfileError::UnsafeKey { key, .. } if key == "../victim.txt"));
    }

    #[test]
    fn garbage_is_invalid_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        std::fs::write(&path, "not = [toml").unwrap();

        let err = TomlLockfileRepository::new().load(&path).unwrap_err();

        assert!(matches!(err, LockfileError::InvalidFormat { .. }));
    }

    #[test]
    fn guard_creates_sidecar_and_can_be_reacquired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);

        let guard = LockfileGuard::acquire(&path).unwrap();
        assert!(guard.path().ends_with("hms-scaffold.lock.lck"));
        drop(guard);

        assert!(LockfileGuard::acquire(&path).is_ok());
    }
}
