//! Init command - write a starter configuration and canonical template
//!
//! The starter project describes one ophthalmology module whose template is
//! the canonical one, plus a dental module rendered from it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use hms_scaffold::application::project::base_dir_of;

const TEMPLATE_PATH: &str = "templates/dashboard.html";

const STARTER_TOML: &str = r#"# hms-scaffold configuration
#
# Modules are rendered from the canonical template below by replacing the
# tokens it was written with.

[template]
path = "templates/dashboard.html"

[template.source]
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"
description = "pacientes oftalmológicos"

[output]
dir = "."
pattern = "{key}/templates/{key}/{role}.html"

[[modules]]
key = "oftalmologia"
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"
description = "pacientes oftalmológicos"
capabilities = ["dashboard", "list", "create", "detail", "update", "delete"]

[[modules]]
key = "dental"
title = "Dental"
icon = "fas fa-tooth"
color = "info"
description = "pacientes dentales"
capabilities = ["dashboard", "list", "create", "detail", "update"]
"#;

const STARTER_YAML: &str = r#"# hms-scaffold configuration
template:
  path: templates/dashboard.html
  source:
    title: Oftalmología
    icon: fas fa-eye
    color: primary
    description: pacientes oftalmológicos

output:
  dir: "."
  pattern: "{key}/templates/{key}/{role}.html"

modules:
  - key: oftalmologia
    title: Oftalmología
    icon: fas fa-eye
    color: primary
    description: pacientes oftalmológicos
    capabilities: [dashboard, list, create, detail, update, delete]
  - key: dental
    title: Dental
    icon: fas fa-tooth
    color: info
    description: pacientes dentales
    capabilities: [dashboard, list, create, detail, update]
"#;

const STARTER_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="card border-0 shadow-sm">
  <div class="card-header bg-primary text-white">
    <h1 class="h4 mb-0"><i class="fas fa-eye"></i> Oftalmología</h1>
  </div>
  <div class="card-body">
    <p class="text-primary">Gestión de pacientes oftalmológicos</p>
    <a href="#" class="btn btn-primary">Nuevo registro</a>
    <a href="#" class="btn btn-outline-primary">Reportes</a>
  </div>
</div>
{% endblock %}
"##;

/// Contents of the starter configuration for `path`'s format
pub(crate) fn starter_config(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => STARTER_YAML,
        _ => STARTER_TOML,
    }
}

pub fn cmd_init(config: &Path, force: bool, json: bool) -> Result<()> {
    let template = base_dir_of(config).join(TEMPLATE_PATH);
    let files: [(PathBuf, &str); 2] = [
        (config.to_path_buf(), starter_config(config)),
        (template, STARTER_TEMPLATE),
    ];

    if !force {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
    }

    for (path, content) in &files {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    }

    let created: Vec<String> = files.iter().map(|(p, _)| p.display().to_string()).collect();
    if json {
        crate::ui::json::emit_complete(
            "init",
            true,
            &serde_json::json!({ "created": created }),
        )?;
    } else {
        for path in &created {
            println!("  created {}", path);
        }
        println!("Next: edit {} and run `hms-scaffold generate`", config.display());
    }
    Ok(())
}
