//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// splitgrid command-line interface for replaying split layouts
#[derive(Parser)]
#[command(name = "splitgrid")]
#[command(author, version, about = "Replay split-layout edits and print the resulting grid")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a settings file (defaults to the user configuration directory)
    #[arg(short, long, global = true, env = "SPLITGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging and error messages; the exit code still reports failure
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay a script of layout edits
    #[command(about = "Replay a script of split/resize/remove edits and print the layout")]
    Replay {
        /// Script file, one edit per line
        script: PathBuf,

        /// Output format for the layout
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Replay the built-in example script
    #[command(about = "Replay a built-in example script and print the layout")]
    Demo {
        /// Output format for the layout
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Print the script before the layout
        #[arg(long)]
        show_script: bool,
    },

    /// Settings management
    #[command(subcommand, about = "Show or create the settings file")]
    Settings(SettingsCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the effective settings as TOML
    Show,

    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Track summary, placement tables and a cell map
    Table,
    /// Output as JSON
    Json,
}
