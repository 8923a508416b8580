use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::{GenerateOptions, GenerateResult, GenerateUseCase};
use hms_scaffold::infrastructure::LockfileGuard;
use hms_scaffold::ScaffoldError;

pub fn cmd_generate(config: &Path, force: bool, dry_run: bool, strict: bool, json: bool) -> Result<()> {
    let project = super::load_project(config, strict)?;
    let lockfile_path = project.lockfile_path();
    let _guard = LockfileGuard::acquire(&lockfile_path)?;

    let options = GenerateOptions::new(lockfile_path)
        .with_force(force)
        .with_dry_run(dry_run);
    let result = GenerateUseCase::local(&project).execute(&project, &options)?;

    if json {
        crate::ui::json::emit_complete("generate", result.is_success(), &result)?;
    } else {
        print!("{}", render_summary(&result, &project.output_dir()));
    }

    if !result.is_success() {
        return Err(ScaffoldError::Conflicts {
            count: result.conflicts.len(),
        }
        .into());
    }
    Ok(())
}

pub(crate) fn render_summary(result: &GenerateResult, output_dir: &Path) -> String {
    let mut out = String::new();
    let (write, remove) = if result.dry_run {
        ("would write", "would remove")
    } else {
        ("write", "remove")
    };

    for path in &result.written {
        out.push_str(&format!("  {:<12} {}\n", write, path.display()));
    }
    for path in &result.removed {
        out.push_str(&format!("  {:<12} {}\n", remove, path.display()));
    }
    for path in &result.kept_orphans {
        out.push_str(&format!("  {:<12} {} (edited, no longer generated)\n", "keep", path.display()));
    }
    for conflict in &result.conflicts {
        out.push_str(&format!(
            "  {:<12} {} ({})\n",
            "conflict",
            conflict.path.display(),
            conflict.reason
        ));
    }
    for entry in &result.unmatched {
        out.push_str(&format!(
            "  {:<12} {} {}: {}\n",
            "unmatched",
            entry.module,
            entry.operation,
            entry.placeholders.join(", ")
        ));
    }

    if !result.is_success() {
        out.push_str(&format!(
            "Nothing written: {} file(s) changed outside hms-scaffold\n",
            result.conflicts.len()
        ));
    } else if result.dry_run {
        out.push_str(&format!(
            "Dry run: {} to write, {} to remove, {} unchanged\n",
            result.written.len(),
            result.removed.len(),
            result.skipped.len()
        ));
    } else if result.has_changes() {
        out.push_str(&format!(
            "Generated {} artifact(s) into {}: {} written, {} removed, {} unchanged\n",
            result.artifact_count,
            output_dir.display(),
            result.written.len(),
            result.removed.len(),
            result.skipped.len()
        ));
    } else {
        out.push_str(&format!(
            "Up to date: {} artifact(s) in {}\n",
            result.artifact_count,
            output_dir.display()
        ));
    }
    out
}
