use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::{ChangeType, DiffResult, DiffUseCase, GenerateOptions};
use hms_scaffold::infrastructure::{DirectorySink, TomlLockfileRepository};

pub fn cmd_diff(config: &Path, json: bool) -> Result<()> {
    let project = super::load_project(config, false)?;
    let artifacts = project.generate()?;

    let use_case = DiffUseCase::new(
        TomlLockfileRepository::new(),
        DirectorySink::local(project.output_dir()),
    );
    let result = use_case.execute(
        &artifacts,
        project.layout(),
        &GenerateOptions::new(project.lockfile_path()),
    )?;

    if json {
        crate::ui::json::emit_complete("diff", true, &result)?;
    } else {
        print!("{}", render_diff(&result));
    }
    Ok(())
}

pub(crate) fn render_diff(result: &DiffResult) -> String {
    if !result.has_changes() {
        return format!("No changes ({} file(s) up to date)\n", result.unchanged);
    }

    let mut out = result.to_patch();
    let count = |kind: ChangeType| result.entries.iter().filter(|e| e.change_type == kind).count();
    out.push_str(&format!(
        "\n{} to create, {} to update, {} to remove, {} conflict(s)\n",
        count(ChangeType::Create),
        count(ChangeType::Update),
        count(ChangeType::Remove),
        count(ChangeType::Conflict)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hms_scaffold::application::{unified_diff, DiffEntry};
    use std::path::PathBuf;

    #[test]
    fn no_changes_message() {
        let result = DiffResult {
            entries: vec![],
            unchanged: 3,
        };
        assert_eq!(render_diff(&result), "No changes (3 file(s) up to date)\n");
    }

    #[test]
    fn patch_then_counts() {
        let path = PathBuf::from("dental/list.html");
        let result = DiffResult {
            entries: vec![DiffEntry {
                diff: unified_diff(&path, "", "<h1>Dental</h1>\n"),
                path,
                change_type: ChangeType::Create,
            }],
            unchanged: 0,
        };

        let text = render_diff(&result);

        assert!(text.starts_with("--- a/dental/list.html"));
        assert!(text.contains("+<h1>Dental</h1>"));
        assert!(text.ends_with("1 to create, 0 to update, 0 to remove, 0 conflict(s)\n"));
    }
}
