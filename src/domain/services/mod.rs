//! Domain Services
//!
//! Pure business logic over the domain entities. Nothing here performs I/O.
//!
//! - `substitution` - ordered, non-overlapping token replacement
//! - `rules` - the canonical rule set built from the source tokens
//! - `bindings` - capability set to view binding table
//! - `generator` - registry to artifact set
//! - `layout` - artifact to output path
//! - `planner` - write/skip/conflict decisions against the lockfile

mod bindings;
mod generator;
mod layout;
mod planner;
mod rules;
mod substitution;

pub use bindings::{bindings_for, MODULE_NAME_KEY, MODULE_TYPE_HMS, MODULE_TYPE_KEY};
pub use generator::{generate, GenerationError, Generator};
pub use layout::{stays_inside_root, Layout, LayoutError, Placement, DEFAULT_PATTERN};
pub use planner::{
    ConflictReason, FileAction, OrphanAction, PlannedFile, PlannedOrphan, Planner, SyncPlan,
    TargetFileState,
};
pub use rules::{RuleFactory, SourceTokens, DEFAULT_CLASS_STEMS};
pub use substitution::{
    apply, Replacement, RuleScope, RuleSet, RuleSetError, Substitution, SubstitutionRule,
    PATTERN_FIELDS,
};
