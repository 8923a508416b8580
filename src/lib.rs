//! hms-scaffold - declarative module descriptors for hospital ERP admin modules
//!
//! Each department module (Dental, Farmacia, Oftalmología, ...) is described
//! once as a `ModuleDescriptor`. Its templates are derived from one
//! canonical template by literal token substitution, and its routes and view
//! bindings come from its capability set.
//!
//! Layers:
//! - `domain`: descriptors, registry, substitution engine, generator, planner
//! - `application`: use cases behind each CLI command
//! - `infrastructure`: filesystem template source, artifact sink, lockfile
//! - `config`: `hms-scaffold.toml` loading

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{GenerateOptions, GenerateResult, GenerateUseCase, Project};
pub use config::Config;
pub use domain::entities::{ArtifactSet, GeneratedArtifact, ModuleDescriptor, Registry};
pub use domain::services::Generator;
pub use domain::value_objects::{Guard, Operation, Palette};
pub use error::{ScaffoldError, ScaffoldResult};
