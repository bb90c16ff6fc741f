//! Design system scanner.
//!
//! Walks a host design document, resolves colors, typography, and variables
//! to design-system references, and classifies every component by UI role.
//! The result is a versioned [`ScanSession`](ds_core::ScanSession).
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`DocumentWalker`]: page-by-page discovery of components and sets
//! - [`StyleRegistry`]: per-scan lookup tables and style catalogues
//! - [`ComponentAnalyzer`]: classification, slots, layout, and style context
//! - [`ScanStats`]: atomic counters returned with every report
//!
//! # Example
//!
//! ```
//! use ds_core::{Document, ScannerConfig};
//! use ds_scanner::{Scanner, SnapshotHost};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let document: Document = serde_json::from_str(r#"{
//!     "pages": [{"id": "0:1", "name": "Components", "children": [
//!         {"id": "1:1", "name": "Primary Button", "type": "COMPONENT"}
//!     ]}]
//! }"#).unwrap();
//!
//! let scanner = Scanner::new(ScannerConfig::default()).unwrap();
//! let report = scanner.scan(&SnapshotHost::new(document)).await.unwrap();
//!
//! let button = &report.session.components()[0];
//! assert_eq!(button.suggested_type, "button");
//! assert_eq!(button.confidence, 0.90);
//! # });
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── DocumentWalker (explicit work-list per page)
//!     │
//!     ├── StyleRegistry (built fresh each scan)
//!     │       │
//!     │       └── ColorResolver (token > style > raw)
//!     │
//!     ├── ComponentAnalyzer (bounded, order-preserving concurrency)
//!     │       │
//!     │       ├── classify (role patterns)
//!     │       ├── slots (text, component, variants)
//!     │       └── layout (padding, behavior, style context)
//!     │
//!     └── ScanSessionBuilder → KeyValueStore
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod color;
mod error;
mod host;
mod layout;
mod registry;
mod session;
mod slots;
mod snapshot;
mod stats;
mod storage;
mod walker;

pub use analyzer::{Analysis, ComponentAnalyzer, MIN_BASIC_CONFIDENCE, basic_confidence};
pub use classifier::{
    CONTAINS_CONFIDENCE, EXACT_CONFIDENCE, FOLDED_CONFIDENCE, PATTERN_CONFIDENCE,
    UNKNOWN_CONFIDENCE, UNKNOWN_ROLE, classify, guess_slot_category, infer_semantic_role,
};
pub use color::ColorResolver;
pub use error::ScanError;
pub use host::{ComponentRef, DocumentHost, PageRef};
pub use layout::{has_image_slot, infer_padding, layout_behavior, style_context};
pub use registry::{
    EntryDetails, FontWeightClass, RegistryBuild, RegistryEntry, StyleKind, StyleRegistry,
    TextStyleEntry, VariableEntry, categorize_color_style, id_candidates, parse_color_variant,
    token_slug,
};
pub use session::{ScanSessionBuilder, epoch_millis};
pub use slots::{
    ComponentSlots, component_slots, estimate_max_length, representative, text_slots,
    variant_options,
};
pub use snapshot::SnapshotHost;
pub use stats::{ScanStats, StatsSnapshot};
pub use storage::{
    FileStore, KeyValueStore, LEGACY_KEY, MemoryStore, PRIMARY_KEY, component_id_for_type,
    load_last_scan, load_legacy_components, persist_session,
};
pub use walker::{Candidate, DocumentWalker, WalkOutcome, find_components};

use std::hash::{Hash, Hasher};

use ds_core::{ScanSession, ScannerConfig, fx_hash_set};
use futures_util::{StreamExt, stream};
use rustc_hash::FxHasher;
use tracing::{Instrument, debug, info, info_span};

/// Result of a scan.
///
/// Contains the session, a statistics snapshot, and every recovered error.
#[derive(Debug)]
pub struct ScanReport {
    /// The assembled session.
    pub session: ScanSession,
    /// Statistics snapshot taken when the scan finished.
    pub stats: StatsSnapshot,
    /// Non-fatal errors, in the order they occurred.
    pub errors: Vec<ScanError>,
}

/// The design system scanner.
///
/// Holds only configuration; every call to [`Scanner::scan`] builds its own
/// registry and statistics, so scans never share state.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a scanner with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the configuration is invalid.
    pub fn new(config: ScannerConfig) -> Result<Self, ScanError> {
        config
            .validate()
            .map_err(|e| ScanError::config(e.to_string()))?;
        Ok(Self { config })
    }

    /// Scanner configuration.
    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scans a document.
    ///
    /// Always returns a best-effort session unless the page list itself
    /// cannot be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PagesUnavailable`] if the host cannot list pages.
    pub async fn scan<H>(&self, host: &H) -> Result<ScanReport, ScanError>
    where
        H: DocumentHost + ?Sized,
    {
        let started = epoch_millis();
        let file_key = host.file_key();
        let scan_id = scan_id(file_key.as_deref(), started);
        self.scan_inner(host, file_key, started)
            .instrument(info_span!("scan", scan_id = %scan_id))
            .await
    }

    async fn scan_inner<H>(
        &self,
        host: &H,
        file_key: Option<String>,
        started: u64,
    ) -> Result<ScanReport, ScanError>
    where
        H: DocumentHost + ?Sized,
    {
        let stats = ScanStats::new();
        info!(file_key = file_key.as_deref().unwrap_or("-"), "Starting scan");

        let walk = DocumentWalker::new(host).collect(&stats).await?;
        let mut errors = walk.errors;

        let RegistryBuild {
            registry,
            errors: registry_errors,
        } = StyleRegistry::build(host, &stats).await;
        errors.extend(registry_errors);

        let mut seen = fx_hash_set();
        let mut candidates = Vec::with_capacity(walk.candidates.len());
        for candidate in walk.candidates {
            stats.increment_found();
            if seen.insert(candidate.node.id.clone()) {
                candidates.push(candidate);
            } else {
                debug!(node_id = %candidate.node.id, "Skipping duplicate component id");
                stats.increment_duplicates();
            }
        }

        let analyzer = ComponentAnalyzer::new(host, &registry, &self.config, &stats);
        let analyses: Vec<Analysis> = stream::iter(candidates.iter().map(|c| analyzer.analyze(c)))
            .buffered(self.config.max_concurrent_analyses.max(1))
            .collect()
            .await;

        let mut records = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            errors.extend(analysis.errors);
            records.extend(analysis.record);
        }

        let session = ScanSessionBuilder::new(&self.config.session_version)
            .with_components(records)
            .with_registry(&registry)
            .with_file_key(file_key)
            .with_scan_time(started)
            .build();
        let stats = stats.snapshot();

        info!(
            components = session.components().len(),
            degraded = stats.degraded,
            dropped = stats.dropped,
            errors = errors.len(),
            elapsed_ms = epoch_millis().saturating_sub(started),
            "Scan complete"
        );
        Ok(ScanReport {
            session,
            stats,
            errors,
        })
    }
}

/// Short id correlating the log events of one scan.
fn scan_id(file_key: Option<&str>, started: u64) -> String {
    let mut hasher = FxHasher::default();
    file_key.hash(&mut hasher);
    started.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::Document;

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ScannerConfig::default().with_max_concurrent_analyses(0);
        assert!(matches!(Scanner::new(config), Err(ScanError::Config(_))));
    }

    #[test]
    fn test_scan_id_is_stable() {
        assert_eq!(scan_id(Some("abc"), 1), scan_id(Some("abc"), 1));
        assert_ne!(scan_id(Some("abc"), 1), scan_id(Some("abc"), 2));
        assert_eq!(scan_id(None, 1).len(), 16);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_emitted_once() {
        let document: Document = serde_json::from_str(
            r#"{"pages": [
                {"id": "0:1", "name": "A", "children": [{"id": "1:1", "name": "Card", "type": "COMPONENT"}]},
                {"id": "0:2", "name": "B", "children": [{"id": "1:1", "name": "Card", "type": "COMPONENT"}]}
            ]}"#,
        )
        .unwrap();
        let report = Scanner::default()
            .scan(&SnapshotHost::new(document))
            .await
            .unwrap();
        assert_eq!(report.session.components().len(), 1);
        assert_eq!(report.stats.found, 2);
        assert_eq!(report.stats.duplicates, 1);
    }
}
