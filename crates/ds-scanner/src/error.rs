//! Error types for the ds-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while walking a document, analyzing components, and persisting sessions.

use ds_core::HostError;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **Page loading** ([`ScanError::PagesUnavailable`]): Fatal - no session is produced
/// - **Page enumeration** ([`ScanError::PageSkipped`]): Log warning, skip page, continue scan
/// - **Token source** ([`ScanError::Tokens`]): Log warning, synthesize tokens from color styles
/// - **Analysis** ([`ScanError::Analysis`]): Log warning, retry with basic analysis
/// - **Basic analysis** ([`ScanError::BasicAnalysis`]): Log warning, drop the component
/// - **Slots** ([`ScanError::Slot`]): Log warning, omit that slot
///
/// # Examples
///
/// ```
/// use ds_scanner::ScanError;
///
/// let err = ScanError::analysis("12:7", "default variant 12:9 is not a child");
/// assert!(err.is_recoverable());
/// assert_eq!(err.node_id(), Some("12:7"));
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    /// The document's pages could not be loaded.
    #[error("failed to load document pages: {0}")]
    PagesUnavailable(#[source] HostError),

    /// One page could not be enumerated and was skipped.
    #[error("skipped page {page_id}: {source}")]
    PageSkipped {
        /// Id of the skipped page.
        page_id: String,
        /// The host failure.
        #[source]
        source: HostError,
    },

    /// Variables could not be read; tokens fall back to color styles.
    #[error("design tokens unavailable: {0}")]
    Tokens(#[source] HostError),

    /// Local styles could not be read; the catalogue is left empty.
    #[error("styles unavailable: {0}")]
    Styles(#[source] HostError),

    /// Full analysis of a component failed.
    #[error("failed to analyze {node_id}: {reason}")]
    Analysis {
        /// Id of the component.
        node_id: String,
        /// What went wrong.
        reason: String,
    },

    /// Basic analysis failed too; the component was dropped.
    #[error("dropped {node_id}: {reason}")]
    BasicAnalysis {
        /// Id of the component.
        node_id: String,
        /// What went wrong.
        reason: String,
    },

    /// A component slot could not be resolved and was omitted.
    #[error("omitted slot '{slot}' of {node_id}: {source}")]
    Slot {
        /// Id of the component owning the slot.
        node_id: String,
        /// Exact layer name of the slot.
        slot: String,
        /// The host failure.
        #[source]
        source: HostError,
    },

    /// Reading or writing the session store failed.
    #[error("storage error for key '{key}': {reason}")]
    Storage {
        /// Storage key.
        key: String,
        /// What went wrong.
        reason: String,
    },

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Creates a new [`ScanError::Analysis`] error.
    #[inline]
    pub fn analysis(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Analysis {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ScanError::BasicAnalysis`] error.
    #[inline]
    pub fn basic_analysis(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BasicAnalysis {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ScanError::Storage`] error.
    #[inline]
    pub fn storage(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Storage {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if the scan continues past this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PageSkipped { .. }
                | Self::Tokens(_)
                | Self::Styles(_)
                | Self::Analysis { .. }
                | Self::BasicAnalysis { .. }
                | Self::Slot { .. }
        )
    }

    /// Returns `true` if this error stops the scan.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the component id associated with this error, if any.
    #[must_use]
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Analysis { node_id, .. }
            | Self::BasicAnalysis { node_id, .. }
            | Self::Slot { node_id, .. } => Some(node_id),
            Self::PagesUnavailable(_)
            | Self::PageSkipped { .. }
            | Self::Tokens(_)
            | Self::Styles(_)
            | Self::Storage { .. }
            | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_unavailable_is_fatal() {
        let err = ScanError::PagesUnavailable(HostError::PagesUnavailable("offline".to_owned()));
        assert!(err.is_fatal());
        assert!(err.node_id().is_none());
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_page_skipped_is_recoverable() {
        let err = ScanError::PageSkipped {
            page_id: "0:3".to_owned(),
            source: HostError::lookup("0:3", "timeout"),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("0:3"));
    }

    #[test]
    fn test_slot_error() {
        let err = ScanError::Slot {
            node_id: "4:1".to_owned(),
            slot: "Leading Icon".to_owned(),
            source: HostError::lookup("4:2", "main component missing"),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.node_id(), Some("4:1"));
        assert!(err.to_string().contains("Leading Icon"));
    }

    #[test]
    fn test_storage_error_is_fatal() {
        let err = ScanError::storage("design-system-scan", "disk full");
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "storage error for key 'design-system-scan': disk full"
        );
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::config("max_concurrent_analyses must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_concurrent_analyses must be at least 1"
        );
    }
}
