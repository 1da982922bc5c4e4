//! Layout and logging settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::layout::{DEFAULT_MIN_SIZE, DEFAULT_RATIO, LeafNode};
use crate::tracing::TracingLevel;

const CONFIG_DIR_NAME: &str = "splitgrid";
const CONFIG_FILE_NAME: &str = "settings.toml";

/// Settings for layout trees and the tools built on them.
///
/// Every field has a default, so a partial (or empty) TOML file is valid.
///
/// ```toml
/// default_min_width = 32.0
/// default_ratio = 0.6
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Minimum width given to freshly created leaves.
    pub default_min_width: f64,
    /// Minimum height given to freshly created leaves.
    pub default_min_height: f64,
    /// Ratio used when a split request does not name one.
    pub default_ratio: f64,
    /// Logging preferences.
    pub logging: LoggingSettings,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_min_width: DEFAULT_MIN_SIZE,
            default_min_height: DEFAULT_MIN_SIZE,
            default_ratio: DEFAULT_RATIO,
            logging: LoggingSettings::default(),
        }
    }
}

/// Logging preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level.
    pub level: TracingLevel,
    /// Log to this file instead of standard error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl LayoutSettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Validation` for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _span = crate::trace_operation_debug!(
            crate::tracing::span_names::CONFIG_LOAD,
            path = %path.display()
        )
        .entered();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("Settings loaded");
        Ok(settings)
    }

    /// Loads settings from the default location, falling back to defaults
    /// when no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read, parsed or
    /// validated.
    pub fn load_or_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validates and writes settings to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or writing fails.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let _span = crate::trace_operation_debug!(
            crate::tracing::span_names::CONFIG_SAVE,
            path = %path.display()
        )
        .entered();

        self.validate()?;
        let text = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default settings file: `<config dir>/splitgrid/settings.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.default_ratio) {
            return Err(ConfigError::Validation {
                field: "default_ratio".to_string(),
                reason: format!("{} is not between 0.0 and 1.0", self.default_ratio),
            });
        }
        for (field, value) in [
            ("default_min_width", self.default_min_width),
            ("default_min_height", self.default_min_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    reason: format!("{value} is not a finite, non-negative size"),
                });
            }
        }
        Ok(())
    }

    /// Creates a leaf carrying the configured minimum size.
    #[must_use]
    pub fn new_leaf(&self) -> LeafNode {
        LeafNode::new().with_min_size(self.default_min_width, self.default_min_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_leaf_defaults() {
        let settings = LayoutSettings::default();
        let leaf = settings.new_leaf();
        assert!((leaf.min_width - DEFAULT_MIN_SIZE).abs() < f64::EPSILON);
        assert!((leaf.min_height - DEFAULT_MIN_SIZE).abs() < f64::EPSILON);
        assert!((settings.default_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.logging.level, TracingLevel::Info);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let settings = LayoutSettings::from_toml_str("").unwrap();
        assert_eq!(settings, LayoutSettings::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let settings = LayoutSettings::from_toml_str(
            r#"
            default_min_width = 40.0

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert!((settings.default_min_width - 40.0).abs() < f64::EPSILON);
        assert!((settings.default_min_height - DEFAULT_MIN_SIZE).abs() < f64::EPSILON);
        assert_eq!(settings.logging.level, TracingLevel::Debug);
        assert!(settings.logging.log_file.is_none());
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        let err = LayoutSettings::from_toml_str("default_ratio = 1.5").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "default_ratio")
        );
    }

    #[test]
    fn negative_min_size_is_rejected() {
        let err = LayoutSettings::from_toml_str("default_min_height = -1.0").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "default_min_height")
        );
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = LayoutSettings::from_toml_str("default_ratio = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = LayoutSettings {
            default_ratio: 0.25,
            logging: LoggingSettings {
                level: TracingLevel::Warn,
                log_file: Some(PathBuf::from("/tmp/splitgrid.log")),
            },
            ..LayoutSettings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(LayoutSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LayoutSettings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_path_ends_with_file_name() {
        if let Some(path) = LayoutSettings::default_path() {
            assert!(path.ends_with("splitgrid/settings.toml"));
        }
    }
}
