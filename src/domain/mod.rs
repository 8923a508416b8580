//! Domain Layer
//!
//! The core of hms-scaffold: module descriptors, the registry, token
//! substitution and generation. No I/O.
//!
//! ## Structure
//!
//! - `entities/` - ModuleDescriptor, Registry, CanonicalTemplate, artifacts, Lockfile
//! - `value_objects/` - Operation, Palette, Guard, ContentHash
//! - `services/` - Substitution, RuleFactory, bindings, Generator, Layout, Planner
//! - `ports/` - Interfaces implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
