//! Configuration structures for the design system scanner.
//!
//! - [`HeuristicThresholds`] - Geometry and text heuristics used during analysis
//! - [`ScannerConfig`] - Root configuration (thresholds, concurrency, session version)
//!
//! Both types implement [`Default`] with the values the scanner has always
//! shipped with, so an empty JSON object is a valid configuration file.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Schema version written into every scan session.
pub const SESSION_VERSION: &str = "2.1.0";

/// Named thresholds for padding, layout, and text slot heuristics.
///
/// # Examples
///
/// ```
/// use ds_core::HeuristicThresholds;
///
/// let thresholds = HeuristicThresholds::default();
/// assert_eq!(thresholds.icon_max_size, 48.0);
/// assert_eq!(thresholds.touch_target_min_height, 44.0);
/// assert_eq!(thresholds.nested_padding_max_depth, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    /// Smallest accepted geometrically inferred padding value.
    pub geometric_padding_min: f64,

    /// Largest accepted geometrically inferred padding value.
    ///
    /// Offsets outside the window mean the first child is not laid out
    /// inside its parent, so no padding is reported at all.
    pub geometric_padding_max: f64,

    /// A node whose larger side is at most this size is considered an icon.
    pub icon_max_size: f64,

    /// Minimum height for a node to count as a touch target.
    pub touch_target_min_height: f64,

    /// Deepest level searched for nested auto-layout padding.
    pub nested_padding_max_depth: usize,

    /// Average glyph width as a fraction of font size.
    pub char_width_ratio: f64,

    /// Font size assumed when a text node reports none (mixed styles).
    pub default_font_size: f64,

    /// Line count assumed for multi-line text slots.
    pub multi_line_count: u32,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            geometric_padding_min: 0.0,
            geometric_padding_max: 100.0,
            icon_max_size: 48.0,
            touch_target_min_height: 44.0,
            nested_padding_max_depth: 3,
            char_width_ratio: 0.6,
            default_font_size: 14.0,
            multi_line_count: 3,
        }
    }
}

/// Root configuration for a scan.
///
/// # Examples
///
/// ```
/// use ds_core::ScannerConfig;
///
/// let config = ScannerConfig::default().with_max_concurrent_analyses(4);
/// assert_eq!(config.max_concurrent_analyses, 4);
/// assert_eq!(config.session_version, "2.1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Heuristic thresholds.
    pub thresholds: HeuristicThresholds,

    /// How many component analyses may be awaited at once.
    ///
    /// Records are always emitted in traversal order regardless of this value.
    pub max_concurrent_analyses: usize,

    /// Version string stamped on the emitted session.
    pub session_version: String,

    /// Confidence subtracted from a record produced by basic analysis.
    pub basic_confidence_penalty: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            thresholds: HeuristicThresholds::default(),
            max_concurrent_analyses: 8,
            session_version: SESSION_VERSION.to_owned(),
            basic_confidence_penalty: 0.3,
        }
    }
}

impl ScannerConfig {
    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every option is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if self.max_concurrent_analyses == 0 {
            return Err(ConfigError::invalid_option(
                "max_concurrent_analyses",
                "must be at least 1",
            ));
        }
        if self.session_version.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "session_version",
                "must not be empty",
            ));
        }
        if !(0.0..=1.0).contains(&self.basic_confidence_penalty) {
            return Err(ConfigError::invalid_option(
                "basic_confidence_penalty",
                "must be within [0, 1]",
            ));
        }
        if !(t.geometric_padding_min.is_finite()
            && t.geometric_padding_max.is_finite()
            && t.geometric_padding_min <= t.geometric_padding_max)
        {
            return Err(ConfigError::invalid_option(
                "thresholds.geometric_padding_max",
                "padding window must be finite with min <= max",
            ));
        }
        if !(t.char_width_ratio.is_finite() && t.char_width_ratio > 0.0) {
            return Err(ConfigError::invalid_option(
                "thresholds.char_width_ratio",
                "must be positive",
            ));
        }
        if !(t.default_font_size.is_finite() && t.default_font_size > 0.0) {
            return Err(ConfigError::invalid_option(
                "thresholds.default_font_size",
                "must be positive",
            ));
        }
        if t.multi_line_count == 0 {
            return Err(ConfigError::invalid_option(
                "thresholds.multi_line_count",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Sets the heuristic thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: HeuristicThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the analysis concurrency bound.
    #[must_use]
    pub fn with_max_concurrent_analyses(mut self, n: usize) -> Self {
        self.max_concurrent_analyses = n;
        self
    }

    /// Sets the session version string.
    #[must_use]
    pub fn with_session_version(mut self, version: impl Into<String>) -> Self {
        self.session_version = version.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults() {
        let t = HeuristicThresholds::default();
        assert_eq!(t.geometric_padding_min, 0.0);
        assert_eq!(t.geometric_padding_max, 100.0);
        assert_eq!(t.char_width_ratio, 0.6);
        assert_eq!(t.default_font_size, 14.0);
        assert_eq!(t.multi_line_count, 3);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"thresholds": {"icon_max_size": 32}}"#;
        let config: ScannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.thresholds.icon_max_size, 32.0);
        assert_eq!(config.thresholds.touch_target_min_height, 44.0);
        assert_eq!(config.max_concurrent_analyses, 8);
        assert_eq!(config.basic_confidence_penalty, 0.3);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = ScannerConfig::default().with_max_concurrent_analyses(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_concurrent_analyses"));
    }

    #[test]
    fn test_validate_rejects_inverted_padding_window() {
        let thresholds = HeuristicThresholds {
            geometric_padding_min: 50.0,
            geometric_padding_max: 10.0,
            ..HeuristicThresholds::default()
        };
        let config = ScannerConfig::default().with_thresholds(thresholds);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ScannerConfig::from_json_file(Utf8Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = ScannerConfig::default().with_session_version("3.0.0");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ScannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
