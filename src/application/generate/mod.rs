//! Generate Module
//!
//! Orchestrates one generation run against the output tree.
//!
//! ## Structure
//!
//! - `options` - Run flags (`GenerateOptions`)
//! - `result` - Outcome of a run (`GenerateResult`)
//! - `use_case` - Planning and execution (`GenerateUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hms_scaffold::application::generate::{GenerateOptions, GenerateUseCase};
//!
//! let use_case = GenerateUseCase::new(lockfile_repo, sink);
//! let result = use_case.execute(&project, &GenerateOptions::new(lockfile_path))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::{ConflictEntry, GenerateResult, UnmatchedEntry};
pub use use_case::GenerateUseCase;
