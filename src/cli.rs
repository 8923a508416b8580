use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hms-scaffold - declarative module descriptors to admin templates
#[derive(Parser, Debug)]
#[command(name = "hms-scaffold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, or YAML by extension)
    #[arg(short, long, global = true, default_value = hms_scaffold::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every module and write the templates
    Generate {
        /// Overwrite files changed outside hms-scaffold
        #[arg(short, long)]
        force: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,

        /// Fail when a substitution rule matches nothing
        #[arg(long)]
        strict: bool,
    },

    /// Exit non-zero when generated files drift from the configuration
    Check {
        /// Fail when a substitution rule matches nothing
        #[arg(long)]
        strict: bool,
    },

    /// Preview changes as a unified diff
    Diff,

    /// Print the route table
    Routes,

    /// Report every configuration problem
    Validate,

    /// Write a starter configuration and template
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Regenerate whenever the configuration or a template changes
    Watch {
        /// Overwrite files changed outside hms-scaffold
        #[arg(short, long)]
        force: bool,

        /// Fail when a substitution rule matches nothing
        #[arg(long)]
        strict: bool,
    },
}
