use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::project::base_dir_of;
use hms_scaffold::application::{ValidateResult, ValidateUseCase};
use hms_scaffold::config::Config;
use hms_scaffold::infrastructure::FsTemplateSource;

pub fn cmd_validate(config_path: &Path, json: bool) -> Result<()> {
    // A config that does not parse is the one problem validate cannot collect
    let (config, warnings) = Config::load_with_warnings(config_path)?;

    let use_case = ValidateUseCase::new(FsTemplateSource::local(base_dir_of(config_path)));
    let result = use_case.execute(&config, &warnings);

    if json {
        crate::ui::json::emit_complete("validate", result.is_valid(), &result)?;
    } else {
        print!("{}", render_report(&result));
    }

    if !result.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) fn render_report(result: &ValidateResult) -> String {
    let mut out = String::new();
    for problem in &result.problems {
        out.push_str(&format!("  error [{}] {}\n", problem.stage, problem.message));
    }
    for warning in &result.warnings {
        out.push_str(&format!("  warning {}\n", warning));
    }
    if result.is_valid() {
        out.push_str(&format!(
            "Valid: {} module(s), {} rule(s), {} artifact(s)\n",
            result.module_count, result.rule_count, result.artifact_count
        ));
    } else {
        out.push_str(&format!("Invalid: {} problem(s)\n", result.problems.len()));
    }
    out
}
