//! Configuration management for splitgrid
//!
//! Settings are stored as TOML. They hold the defaults applied to freshly
//! created leaves and splits, plus logging preferences for the binary.

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{LayoutSettings, LoggingSettings};
