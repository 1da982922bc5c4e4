//! Replay script command.

use std::path::Path;

use splitgrid_core::LayoutSettings;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::script::{Replay, parse_script};

/// Replay command handler
pub fn cmd_replay(
    settings: LayoutSettings,
    script: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let text = std::fs::read_to_string(script)?;
    let lines = parse_script(&text)?;

    let mut replay = Replay::new(settings);
    replay.run(&lines)?;

    super::print_layout(&replay, format)
}
