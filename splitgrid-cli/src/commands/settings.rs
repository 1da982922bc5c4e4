//! Settings commands.

use std::path::Path;

use splitgrid_core::LayoutSettings;

use crate::cli::SettingsCommands;
use crate::error::CliError;
use crate::util::settings_path;

/// Settings command handler
pub fn cmd_settings(
    config_path: Option<&Path>,
    settings: &LayoutSettings,
    subcommand: SettingsCommands,
) -> Result<(), CliError> {
    match subcommand {
        SettingsCommands::Show => {
            print!("{}", settings.to_toml_string()?);
            Ok(())
        }
        SettingsCommands::Init { force } => cmd_init(config_path, force),
    }
}

fn cmd_init(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = settings_path(config_path)
        .ok_or(CliError::Config(splitgrid_core::ConfigError::NoConfigDir))?;
    if path.exists() && !force {
        return Err(CliError::Output(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    LayoutSettings::default().save(&path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
