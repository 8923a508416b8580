//! Watch Use Case
//!
//! Regenerates whenever the configuration file or a canonical template
//! changes:
//! - File system monitoring (via `notify`)
//! - Debouncing (100ms)
//! - Content-hash filtering of editor save noise
//! - A full generate run per batch of changes
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(WatchOptions::new("hms-scaffold.toml"));
//! use_case.start(running, |event| println!("{}", event.to_json()))?;
//! ```

mod event;
mod use_case;


pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::{watch_dirs, WatchUseCase};
