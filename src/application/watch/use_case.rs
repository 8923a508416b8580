//! Watch Use Case implementation

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::application::generate::{GenerateOptions, GenerateResult, GenerateUseCase};
use crate::application::project::{self, base_dir_of, Project};
use crate::config::Config;
use crate::domain::value_objects::ContentHash;
use crate::error::ScaffoldResult;
use crate::infrastructure::LockfileGuard;

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Watch Use Case
///
/// Entry point for `hms-scaffold watch`.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    /// Start watching (blocking)
    ///
    /// Blocks until `running` is cleared. A failed regeneration is reported
    /// as an `Error` event and watching continues.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> ScaffoldResult<()>
    where
        F: Fn(WatchEvent),
    {
        let mut watched = self.watched_paths();
        on_event(WatchEvent::WatchStarted {
            config: self.options.config_path.display().to_string(),
            watching: watched.iter().map(|p| p.display().to_string()).collect(),
        });

        self.run_once(&on_event);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            notify::Config::default(),
        )?;

        // Editors replace files by rename, so watch the existing parent directories
        let mut dirs = watch_dirs(&watched);
        for dir in dirs.iter().filter(|d| d.is_dir()) {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        let mut hashes = snapshot(&watched);
        let mut state = WatcherState::new();

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                let path = normalize(&path);
                if watched.contains(&path) {
                    let hash = hash_file(&path);
                    if hashes.get(&path) != Some(&hash) {
                        hashes.insert(path.clone(), hash);
                        state.add_change(path);
                    }
                }
            }

            if state.should_sync() {
                for path in state.take_changes() {
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                self.run_once(&on_event);

                // The configuration may now name other templates
                let next = self.watched_paths();
                if next != watched {
                    let next_dirs = watch_dirs(&next);
                    for dir in dirs.difference(&next_dirs) {
                        let _ = watcher.unwatch(dir);
                    }
                    for dir in next_dirs.difference(&dirs).filter(|d| d.is_dir()) {
                        watcher.watch(dir, RecursiveMode::NonRecursive)?;
                    }
                    debug!(files = next.len(), "watch set changed");
                    hashes = snapshot(&next);
                    dirs = next_dirs;
                    watched = next;
                }
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// One full generate run, reported through `on_event`
    pub fn run_once(&self, on_event: &impl Fn(WatchEvent)) {
        on_event(WatchEvent::GenerateStarted);
        match self.generate() {
            Ok(result) => on_event(WatchEvent::GenerateComplete {
                written: result.written.len(),
                skipped: result.skipped.len(),
                removed: result.removed.len(),
                conflicts: result.conflicts.len(),
            }),
            Err(e) => {
                warn!(error = %e, "regeneration failed");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    fn generate(&self) -> ScaffoldResult<GenerateResult> {
        let mut project = Project::load(&self.options.config_path)?;
        if let Some(strict) = self.options.strict {
            project = project.with_strict(strict);
        }
        let lockfile_path = project.lockfile_path();
        let _guard = LockfileGuard::acquire(&lockfile_path)?;
        GenerateUseCase::local(&project).execute(
            &project,
            &GenerateOptions::new(lockfile_path).with_force(self.options.force),
        )
    }

    /// Normalized paths of the config file and the templates it names
    ///
    /// An unreadable configuration leaves only itself watched.
    fn watched_paths(&self) -> BTreeSet<PathBuf> {
        let config_path = &self.options.config_path;
        let paths = match Config::load(config_path) {
            Ok(config) => project::watched_paths(config_path, &config),
            Err(_) => vec![config_path.clone()],
        };
        paths.iter().map(|p| normalize(p)).collect()
    }
}

/// Distinct parent directories of `paths`
pub fn watch_dirs(paths: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
    paths.iter().map(|p| base_dir_of(p)).collect()
}

/// Absolute form of `path` with its directory canonicalized
///
/// The file itself may not exist (deleted, or mid-rename).
pub(super) fn normalize(path: &Path) -> PathBuf {
    let dir = base_dir_of(path);
    match (dir.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn hash_file(path: &Path) -> Option<ContentHash> {
    std::fs::read(path).ok().map(|b| ContentHash::of_bytes(&b))
}

fn snapshot(paths: &BTreeSet<PathBuf>) -> HashMap<PathBuf, Option<ContentHash>> {
    paths.iter().map(|p| (p.clone(), hash_file(p))).collect()
}
