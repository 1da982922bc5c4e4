//! Shared helpers used across command modules.

use std::path::{Path, PathBuf};

use splitgrid_core::{LayoutSettings, TracingConfig, init_tracing};

use crate::error::CliError;

/// Resolves the settings file: the `--config` argument or the default
/// location.
pub fn settings_path(config_path: Option<&Path>) -> Option<PathBuf> {
    config_path
        .map(Path::to_path_buf)
        .or_else(LayoutSettings::default_path)
}

/// Loads settings from `--config`, or from the default location if a file
/// exists there, or falls back to defaults.
pub fn load_settings(config_path: Option<&Path>) -> Result<LayoutSettings, CliError> {
    let settings = match config_path {
        Some(path) => LayoutSettings::load(path)?,
        None => LayoutSettings::load_or_default()?,
    };
    Ok(settings)
}

/// Installs the log subscriber. Each `-v` raises the configured level by
/// one step.
pub fn init_logging(settings: &LayoutSettings, verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let mut config = TracingConfig::from_settings(&settings.logging);
    config.level = config.level.raised(verbose);
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: {e}");
    }
}
