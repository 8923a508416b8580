use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::{CheckResult, CheckUseCase, GenerateOptions};
use hms_scaffold::infrastructure::{DirectorySink, TomlLockfileRepository};

pub fn cmd_check(config: &Path, strict: bool, json: bool) -> Result<()> {
    let project = super::load_project(config, strict)?;
    let artifacts = project.generate()?;

    let use_case = CheckUseCase::new(
        TomlLockfileRepository::new(),
        DirectorySink::local(project.output_dir()),
    );
    let result = use_case.execute(
        &artifacts,
        project.layout(),
        &GenerateOptions::new(project.lockfile_path()),
    )?;

    if json {
        crate::ui::json::emit_complete("check", result.is_clean(), &result)?;
    } else {
        print!("{}", render_report(&result));
    }

    if !result.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) fn render_report(result: &CheckResult) -> String {
    let mut out = String::new();
    for item in &result.items {
        out.push_str(&format!("  {:<14} {}\n", item.status.to_string(), item.path.display()));
    }
    if result.is_clean() {
        out.push_str(&format!(
            "OK: {} artifact(s) up to date\n",
            result.up_to_date
        ));
    } else {
        out.push_str(&format!(
            "Drift: {} file(s) differ, {} up to date (run `hms-scaffold generate`)\n",
            result.items.len(),
            result.up_to_date
        ));
    }
    out
}
