//! Shared fixtures for CLI integration tests.
//!
//! `TestProject` lays out a configuration file, a canonical template and an
//! output directory inside a temp dir, and runs the binary against it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Canonical template written for the ophthalmology module
pub const TEMPLATE: &str = "<h1 class=\"text-primary\"><i class=\"fas fa-eye\"></i> Oftalmología</h1>\n";

/// Header shared by every fixture configuration
pub const BASE_CONFIG: &str = r#"[template]
path = "templates/dashboard.html"

[template.source]
title = "Oftalmología"
icon = "fas fa-eye"
color = "primary"

[output]
dir = "out"
pattern = "{key}/{role}.html"
"#;

pub const DENTAL: &str = r#"
[[modules]]
key = "dental"
title = "Dental"
icon = "fas fa-tooth"
color = "info"
capabilities = ["dashboard", "list"]
"#;

pub const FARMACIA: &str = r#"
[[modules]]
key = "farmacia"
title = "Farmacia"
icon = "fas fa-pills"
color = "success"
capabilities = ["dashboard"]
"#;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Project with the canonical template and the given module blocks
    pub fn new(modules: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self { dir };
        project.write("templates/dashboard.html", TEMPLATE);
        project.set_modules(modules);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Rewrite the configuration with a new set of modules
    pub fn set_modules(&self, modules: &[&str]) {
        self.write("hms-scaffold.toml", &format!("{BASE_CONFIG}{}", modules.concat()));
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_hms-scaffold"))
            .current_dir(self.root())
            .env_remove("HMS_SCAFFOLD_OUTPUT_DIR")
            .env_remove("HMS_SCAFFOLD_STRICT")
            .env_remove("HMS_SCAFFOLD_LOG")
            .args(args)
            .output()
            .unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The single NDJSON line a `--json` command prints
pub fn json_line(output: &Output) -> serde_json::Value {
    let out = stdout(output);
    let line = out
        .lines()
        .rfind(|l| !l.trim().is_empty())
        .unwrap_or_else(|| panic!("no JSON output; stderr:\n{}", stderr(output)));
    serde_json::from_str(line).unwrap()
}
