//! CLI error types and exit codes.

use splitgrid_core::{ConfigError, LayoutError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, script syntax, I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// A layout operation in the script was rejected by the tree
    pub const LAYOUT_REJECTED: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A script line could not be parsed or names an unknown label
    #[error("Script error at line {line}: {message}")]
    Script {
        /// 1-based line number
        line: usize,
        /// What is wrong
        message: String,
    },

    /// A layout operation was rejected
    #[error("Layout error at line {line}: {source}")]
    Layout {
        /// 1-based line number
        line: usize,
        /// Error from the layout tree
        #[source]
        source: LayoutError,
    },

    /// The grid could not be computed from the edited tree
    #[error("Layout computation failed: {0}")]
    Compute(#[source] LayoutError),

    /// Output could not be produced
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a script error for a line.
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, script syntax, layout computation,
    ///   output, IO)
    /// - 2: Layout operation rejected
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Layout { .. } => exit_codes::LAYOUT_REJECTED,
            Self::Config(_)
            | Self::Script { .. }
            | Self::Compute(_)
            | Self::Output(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
