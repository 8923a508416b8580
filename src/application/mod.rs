//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - Render, plan, write, prune, update the lockfile
//! - `CheckUseCase` - Report drift between the output tree and a fresh render
//! - `DiffUseCase` - Unified diffs of pending changes
//! - `ValidateUseCase` - Collect every configuration problem at once
//! - `WatchUseCase` - Regenerate on configuration or template changes
//!
//! ## Services
//!
//! - `Project` - Configuration → registry → generator pipeline
//! - `route_table` - Route bindings as data for an external router

pub mod check;
pub mod diff;
pub mod generate;
pub mod project;
pub mod routes;
pub mod validate;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;

pub use check::{CheckItem, CheckResult, CheckUseCase, DriftStatus};
pub use diff::{unified_diff, ChangeType, DiffEntry, DiffResult, DiffUseCase};
pub use generate::{ConflictEntry, GenerateOptions, GenerateResult, GenerateUseCase, UnmatchedEntry};
pub use project::Project;
pub use routes::{render_table, route_table, RouteEntry};
pub use validate::{Problem, Stage, ValidateResult, ValidateUseCase};
pub use watch::{WatchEvent, WatchOptions, WatchUseCase, DEBOUNCE_MS};
