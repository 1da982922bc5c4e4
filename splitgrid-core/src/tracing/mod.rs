//! Tracing setup for structured logging
//!
//! The layout tree emits `tracing` events for every mutation and layout
//! computation. This module installs a `tracing-subscriber` registry for
//! binaries and tests that want to see them, and defines the span names used
//! by the tree.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingSettings;

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

static TRACING_CONFIG: OnceLock<TracingConfig> = OnceLock::new();

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// The filter directive or subscriber could not be installed
    #[error("failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing already initialized
    #[error("tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be created
    #[error("failed to create log file {path}: {reason}")]
    FileCreationFailed {
        /// Requested log file
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingLevel {
    /// Only errors (broken tree invariants)
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings and info (default)
    #[default]
    Info,
    /// Adds one event per tree mutation
    Debug,
    /// Everything, including layout pass details
    Trace,
}

impl TracingLevel {
    /// Converts to the `tracing` crate's level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Raises the level by `steps`, saturating at `Trace`.
    ///
    /// Used for repeated `-v` flags.
    #[must_use]
    pub const fn raised(self, steps: u8) -> Self {
        let mut level = self;
        let mut remaining = steps;
        while remaining > 0 {
            level = match level {
                Self::Error => Self::Warn,
                Self::Warn => Self::Info,
                Self::Info => Self::Debug,
                Self::Debug | Self::Trace => Self::Trace,
            };
            remaining -= 1;
        }
        level
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Output destination for log lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard output
    Stdout,
    /// Standard error
    #[default]
    Stderr,
    /// A file, truncated on startup
    File(PathBuf),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log level
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Custom filter directive (overrides level if set)
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from the logging section of the settings.
    #[must_use]
    pub fn from_settings(logging: &LoggingSettings) -> Self {
        let output = logging
            .log_file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File);
        Self {
            level: logging.level,
            output,
            filter: None,
        }
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter directive
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directive applied when no custom filter is set
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("splitgrid={}", self.level)
    }
}

/// Initializes the tracing subscriber with the given configuration
///
/// Call once at startup. Subsequent calls return
/// [`TracingError::AlreadyInitialized`].
///
/// # Errors
///
/// Returns an error if tracing is already initialized, the filter directive
/// is invalid, the log file cannot be created, or another global subscriber
/// is installed.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let _ = TRACING_CONFIG.set(config.clone());

    let filter = match config.filter {
        Some(ref custom_filter) => EnvFilter::try_new(custom_filter)
            .map_err(|e| TracingError::InitializationFailed(e.to_string()))?,
        None => EnvFilter::try_new(config.default_directive())
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    match &config.output {
        TracingOutput::Stdout => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stdout))
            .try_init(),
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stderr))
            .try_init(),
        TracingOutput::File(path) => {
            let file =
                std::fs::File::create(path).map_err(|e| TracingError::FileCreationFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        }
    }
    .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, "Tracing initialized");

    Ok(())
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}

/// Gets the configuration passed to [`init_tracing`], if any
#[must_use]
pub fn get_tracing_config() -> Option<&'static TracingConfig> {
    TRACING_CONFIG.get()
}

/// Creates an info-level span with the given name and fields.
///
/// ```ignore
/// use splitgrid_core::trace_operation;
/// use splitgrid_core::tracing::span_names;
///
/// let _span = trace_operation!(span_names::LAYOUT_SPLIT, leaf = %leaf).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Creates a debug-level span; see [`trace_operation!`].
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Span names for layout operations
pub mod span_names {
    /// Splitting a leaf
    pub const LAYOUT_SPLIT: &str = "layout.split";
    /// Removing a leaf
    pub const LAYOUT_REMOVE: &str = "layout.remove";
    /// Changing a split ratio
    pub const LAYOUT_RESIZE: &str = "layout.resize";
    /// Computing the grid layout
    pub const LAYOUT_COMPUTE: &str = "layout.compute";
    /// Replaying a script of edits
    pub const SCRIPT_REPLAY: &str = "script.replay";
    /// Loading settings
    pub const CONFIG_LOAD: &str = "config.load";
    /// Saving settings
    pub const CONFIG_SAVE: &str = "config.save";
}
