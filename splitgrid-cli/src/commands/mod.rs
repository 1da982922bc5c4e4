//! Command handler modules for the CLI.

mod completions;
mod demo;
mod replay;
mod settings;

use std::path::Path;

use splitgrid_core::LayoutSettings;

use crate::cli::{Commands, OutputFormat};
use crate::error::CliError;
use crate::format::{format_json, format_table};
use crate::script::Replay;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    settings: LayoutSettings,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::Replay { script, format } => replay::cmd_replay(settings, &script, format),
        Commands::Demo {
            format,
            show_script,
        } => demo::cmd_demo(settings, format, show_script),
        Commands::Settings(subcommand) => {
            settings::cmd_settings(config_path, &settings, subcommand)
        }
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}

/// Computes the replay's layout and prints it in the requested format.
fn print_layout(replay: &Replay, format: OutputFormat) -> Result<(), CliError> {
    let layout = replay.layout()?;
    let output = match format {
        OutputFormat::Table => format_table(replay, &layout),
        OutputFormat::Json => format_json(replay, &layout)?,
    };
    println!("{output}");
    Ok(())
}
