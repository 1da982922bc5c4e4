//! splitgrid CLI - replay split-layout edits and print the resulting grid
//!
//! Provides commands for replaying edit scripts against a layout tree,
//! running a built-in demo, managing settings and generating shell
//! completions.

mod cli;
mod commands;
mod error;
mod format;
mod script;
mod util;

use clap::Parser;
use cli::{Cli, Commands, SettingsCommands};
use splitgrid_core::LayoutSettings;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        // `settings init` must work even when the existing file is invalid
        Commands::Settings(SettingsCommands::Init { .. }) => {
            commands::dispatch(config_path, LayoutSettings::default(), cli.command)
        }
        _ => util::load_settings(config_path).and_then(|settings| {
            util::init_logging(&settings, cli.verbose, cli.quiet);
            commands::dispatch(config_path, settings, cli.command)
        }),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
