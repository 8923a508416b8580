//! Command handlers
//!
//! Each handler loads what it needs, runs one use case and renders the
//! result as text or NDJSON. Failures bubble up as `anyhow::Error`;
//! handlers that report a negative verdict (drift, invalid config) exit 1
//! after printing it.

pub mod check;
pub mod diff;
pub mod generate;
pub mod init;
pub mod routes;
pub mod validate;
pub mod watch;

use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::Project;

/// Load the project, forcing strict mode when the flag is set
pub(crate) fn load_project(config: &Path, strict: bool) -> Result<Project> {
    let project = Project::load(config)?;
    Ok(if strict {
        project.with_strict(true)
    } else {
        project
    })
}
