//! Error types for the ds-core crate.
//!
//! - [`ConfigError`] covers loading and validating [`ScannerConfig`](crate::ScannerConfig).
//! - [`HostError`] is what a host document API reports when one of its calls
//!   fails. The scanner decides per call site whether that is fatal.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use ds_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "max_concurrent_analyses".to_owned(),
///     reason: "must be at least 1".to_owned(),
/// };
/// assert!(error.to_string().contains("max_concurrent_analyses"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// A failure reported by the host document API.
///
/// Host errors carry messages rather than source errors so they can be
/// cloned into scan reports and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Pages could not be loaded at all.
    #[error("failed to load pages: {0}")]
    PagesUnavailable(String),

    /// A single page could not be enumerated.
    #[error("failed to enumerate page {page_id}: {reason}")]
    PageEnumeration {
        /// Id of the page that failed.
        page_id: String,
        /// Host-provided reason.
        reason: String,
    },

    /// The variable (design token) API is missing or failed.
    #[error("variables unavailable: {0}")]
    VariablesUnavailable(String),

    /// A local style collection could not be read.
    #[error("styles unavailable: {0}")]
    StylesUnavailable(String),

    /// A lookup for a specific node or variable failed.
    #[error("lookup failed for {id}: {reason}")]
    Lookup {
        /// Id that was being resolved.
        id: String,
        /// Host-provided reason.
        reason: String,
    },
}

impl HostError {
    /// Creates a new [`HostError::Lookup`] error.
    #[inline]
    pub fn lookup(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
