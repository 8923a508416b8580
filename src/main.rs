//! hms-scaffold CLI - declarative module descriptors to admin templates
//!
//! Usage: hms-scaffold [OPTIONS] <COMMAND>
//!
//! Commands:
//!   generate  Render every module and write the templates
//!   check     Exit non-zero when generated files drift
//!   diff      Preview changes as a unified diff
//!   routes    Print the route table
//!   validate  Report every configuration problem
//!   init      Write a starter configuration and template
//!   watch     Regenerate on changes

use anyhow::Result;
use clap::Parser;

use hms_scaffold::logging::{init_logging, LogConfig, LogFormat};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.quiet).with_format(format));

    let json = cli.json;
    if let Err(err) = run(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_path();
    match cli.command {
        Commands::Generate {
            force,
            dry_run,
            strict,
        } => commands::generate::cmd_generate(config, force, dry_run, strict, cli.json),
        Commands::Check { strict } => commands::check::cmd_check(config, strict, cli.json),
        Commands::Diff => commands::diff::cmd_diff(config, cli.json),
        Commands::Routes => commands::routes::cmd_routes(config, cli.json),
        Commands::Validate => commands::validate::cmd_validate(config, cli.json),
        Commands::Init { force } => commands::init::cmd_init(config, force, cli.json),
        Commands::Watch { force, strict } => {
            commands::watch::cmd_watch(config, force, strict, cli.json)
        }
    }
}
