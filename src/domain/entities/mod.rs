//! Domain Entities
//!
//! - `ModuleDescriptor` - one department module
//! - `CanonicalTemplate` - the source document with its regions
//! - `Registry` - validated descriptors plus canonical templates
//! - `GeneratedArtifact` / `ArtifactSet` - rendered output and bindings
//! - `Lockfile` - hashes of files written by the last run

mod artifact;
mod descriptor;
mod lockfile;
mod registry;
mod template;

pub use artifact::{ArtifactSet, GeneratedArtifact, OperationBinding, RouteBinding};
pub use descriptor::{is_valid_module_key, ModuleDescriptor};
pub use lockfile::{key_to_path, lockfile_key, Lockfile, LockfileEntry};
pub use registry::{CanonicalTemplates, Registry, ValidationError};
pub use template::{CanonicalTemplate, TemplateError, TemplateSegment};
