//! Lockfile entity - records what the generator last wrote
//!
//! Keys are output paths relative to the output root, always with forward
//! slashes. The lockfile lets regeneration tell apart files it owns and left
//! untouched, files a person edited afterwards, and files of modules that no
//! longer exist. Persistence lives in `LockfileRepository`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ContentHash, Operation};

/// Normalize a relative path for use as a lockfile key
pub fn lockfile_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Turn a lockfile key back into a platform path
pub fn key_to_path(key: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(key.replace('/', "\\"))
    } else {
        PathBuf::from(key)
    }
}

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileEntry {
    pub hash: ContentHash,
    pub module: String,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    version: u32,
    entries: BTreeMap<String, LockfileEntry>,
}

impl Default for Lockfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockfile {
    /// Current on-disk format version
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            entries: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, key: &str) -> Option<&LockfileEntry> {
        self.entries.get(key)
    }

    pub fn hash_of(&self, key: &str) -> Option<&ContentHash> {
        self.entries.get(key).map(|e| &e.hash)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: LockfileEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn remove(&mut self, key: &str) -> Option<LockfileEntry> {
        self.entries.remove(key)
    }

    /// Entries sorted by key
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LockfileEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
