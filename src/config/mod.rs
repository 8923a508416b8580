//! Configuration module for hms-scaffold
//!
//! Precedence, highest first:
//! 1. CLI flags (`--strict`, `--config`)
//! 2. Environment variables (`HMS_SCAFFOLD_*`)
//! 3. Project config (`hms-scaffold.toml`, or `.yaml`/`.yml`)
//! 4. Built-in defaults

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load_with_warnings, parse_with_warnings, with_env_overrides, ConfigWarning, ENV_PREFIX,
};
pub use types::{
    Config, OutputConfig, RuleConfig, SourceConfig, TemplateConfig, CONFIG_FILE_NAME,
};
