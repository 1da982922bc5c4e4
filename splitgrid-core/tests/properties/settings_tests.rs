//! Property-based tests for settings and tracing configuration

use proptest::prelude::*;
use splitgrid_core::tracing::span_names;
use splitgrid_core::{
    ConfigError, LayoutSettings, LoggingSettings, TracingConfig, TracingLevel, TracingOutput,
};

// ========== Strategies ==========

fn arb_tracing_level() -> impl Strategy<Value = TracingLevel> {
    prop_oneof![
        Just(TracingLevel::Error),
        Just(TracingLevel::Warn),
        Just(TracingLevel::Info),
        Just(TracingLevel::Debug),
        Just(TracingLevel::Trace),
    ]
}

fn arb_min_size() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0..4096.0f64]
}

fn arb_settings() -> impl Strategy<Value = LayoutSettings> {
    (
        arb_min_size(),
        arb_min_size(),
        0.0..=1.0f64,
        arb_tracing_level(),
        any::<bool>(),
    )
        .prop_map(|(width, height, ratio, level, to_file)| LayoutSettings {
            default_min_width: width,
            default_min_height: height,
            default_ratio: ratio,
            logging: LoggingSettings {
                level,
                log_file: to_file.then(|| "/tmp/splitgrid.log".into()),
            },
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Valid settings survive a write to disk and a reload
    #[test]
    fn settings_save_and_load(settings in arb_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        settings.save(&path).unwrap();
        prop_assert_eq!(LayoutSettings::load(&path).unwrap(), settings);
    }

    /// Fresh leaves carry the configured minimum size
    #[test]
    fn settings_apply_to_new_leaves(settings in arb_settings()) {
        let leaf = settings.new_leaf();
        prop_assert!((leaf.min_width - settings.default_min_width).abs() < f64::EPSILON);
        prop_assert!((leaf.min_height - settings.default_min_height).abs() < f64::EPSILON);
        prop_assert!(leaf.tag.is_none());
    }

    /// A default ratio outside [0, 1] is rejected on load
    #[test]
    fn settings_reject_bad_ratio(ratio in prop_oneof![-100.0..-0.001f64, 1.001..100.0f64]) {
        let text = format!("default_ratio = {ratio}");
        let err = LayoutSettings::from_toml_str(&text).unwrap_err();
        prop_assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "default_ratio"),
            "unexpected error: {err}"
        );
    }

    /// TracingLevel round-trips through string conversion in any case
    #[test]
    fn tracing_level_roundtrip(level in arb_tracing_level()) {
        let level_str = level.to_string();
        prop_assert_eq!(level_str.parse::<TracingLevel>(), Ok(level));
        prop_assert_eq!(level_str.to_uppercase().parse::<TracingLevel>(), Ok(level));
    }

    /// The logging section drives the tracing configuration
    #[test]
    fn tracing_config_follows_logging_settings(settings in arb_settings()) {
        let config = TracingConfig::from_settings(&settings.logging);
        prop_assert_eq!(config.level, settings.logging.level);
        match settings.logging.log_file {
            Some(path) => prop_assert_eq!(config.output, TracingOutput::File(path)),
            None => prop_assert_eq!(config.output, TracingOutput::Stderr),
        }
        prop_assert!(config.filter.is_none());
    }

    /// Raising a level never lowers it
    #[test]
    fn tracing_level_raise_is_monotonic(level in arb_tracing_level(), steps in 0u8..8) {
        prop_assert!(level.raised(steps) >= level);
    }
}

// ========== Unit Tests for Span Names ==========

#[test]
fn span_names_follow_naming_convention() {
    for name in [
        span_names::LAYOUT_SPLIT,
        span_names::LAYOUT_REMOVE,
        span_names::LAYOUT_RESIZE,
        span_names::LAYOUT_COMPUTE,
        span_names::SCRIPT_REPLAY,
        span_names::CONFIG_LOAD,
        span_names::CONFIG_SAVE,
    ] {
        assert!(name.contains('.'), "{name} is not category.operation");
    }
}

#[test]
fn default_tracing_config_is_reasonable() {
    let config = TracingConfig::default();
    assert_eq!(config.level, TracingLevel::Info);
    assert_eq!(config.output, TracingOutput::Stderr);
    assert!(config.filter.is_none());
}
