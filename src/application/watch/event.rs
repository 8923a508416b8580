//! Watch event types and options

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Project configuration file
    pub config_path: PathBuf,
    /// Overwrite conflicting files on every run
    pub force: bool,
    /// Override the configured strictness
    pub strict: Option<bool>,
}

impl WatchOptions {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            force: false,
            strict: None,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_strict(mut self, strict: Option<bool>) -> Self {
        self.strict = strict;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        config: String,
        watching: Vec<String>,
    },
    FileChanged {
        path: String,
    },
    GenerateStarted,
    GenerateComplete {
        written: usize,
        skipped: usize,
        removed: usize,
        conflicts: usize,
    },
    /// A run failed; watching continues
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    /// JSON line with a `"command": "watch"` field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line human rendering
    pub fn to_text(&self) -> String {
        match self {
            WatchEvent::WatchStarted { config, watching } => {
                format!("Watching {} file(s) from {} (Ctrl-C to stop)", watching.len(), config)
            }
            WatchEvent::FileChanged { path } => format!("Changed: {path}"),
            WatchEvent::GenerateStarted => "Regenerating...".to_string(),
            WatchEvent::GenerateComplete {
                written,
                skipped,
                removed,
                conflicts: 0,
            } => format!("Done: {written} written, {skipped} unchanged, {removed} removed"),
            WatchEvent::GenerateComplete { conflicts, .. } => {
                format!("Blocked: {conflicts} file(s) changed outside hms-scaffold (use --force)")
            }
            WatchEvent::Error { message } => format!("Error: {message}"),
            WatchEvent::Shutdown => "Stopped".to_string(),
        }
    }
}

/// Watcher state for debouncing
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Pending changes exist and the debounce period has passed
    pub fn should_sync(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
