//! Per-component analysis with a basic fallback.
//!
//! [`ComponentAnalyzer`] turns a [`Candidate`] into a [`ComponentRecord`].
//! A full analysis classifies the name and extracts variants, slots, layout,
//! padding, and style context from the representative node. If that fails,
//! the component is retried once with a basic analysis (name and classifier
//! only, with reduced confidence). If the retry fails too, the component is
//! dropped.
//!
//! # Examples
//!
//! ```
//! use ds_scanner::basic_confidence;
//!
//! assert_eq!(basic_confidence(0.95, 0.3), 0.65);
//! assert_eq!(basic_confidence(0.10, 0.3), 0.10);
//! ```

use ds_core::{ComponentRecord, ScannerConfig};
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::error::ScanError;
use crate::host::DocumentHost;
use crate::layout::{infer_padding, layout_behavior, style_context};
use crate::registry::StyleRegistry;
use crate::slots::{component_slots, representative, text_slots, variant_options};
use crate::stats::ScanStats;
use crate::walker::Candidate;

/// Lowest confidence a degraded record can carry.
pub const MIN_BASIC_CONFIDENCE: f64 = 0.1;

/// Confidence of a basic analysis: reduced by `penalty`, floored at
/// [`MIN_BASIC_CONFIDENCE`], rounded to two decimals.
#[must_use]
pub fn basic_confidence(confidence: f64, penalty: f64) -> f64 {
    ((confidence - penalty).max(MIN_BASIC_CONFIDENCE) * 100.0).round() / 100.0
}

/// Outcome of analyzing one candidate.
#[derive(Debug)]
pub struct Analysis {
    /// The record, or `None` when the component was dropped.
    pub record: Option<ComponentRecord>,
    /// Recovered failures, in the order they occurred.
    pub errors: Vec<ScanError>,
}

/// Analyzes components against a host and a built registry.
#[derive(Debug)]
pub struct ComponentAnalyzer<'a, H: ?Sized> {
    host: &'a H,
    registry: &'a StyleRegistry,
    config: &'a ScannerConfig,
    stats: &'a ScanStats,
}

impl<'a, H> ComponentAnalyzer<'a, H>
where
    H: DocumentHost + ?Sized,
{
    /// Creates an analyzer.
    #[must_use]
    pub const fn new(
        host: &'a H,
        registry: &'a StyleRegistry,
        config: &'a ScannerConfig,
        stats: &'a ScanStats,
    ) -> Self {
        Self {
            host,
            registry,
            config,
            stats,
        }
    }

    /// Analyzes one candidate, falling back to a basic analysis on failure.
    pub async fn analyze(&self, candidate: &Candidate) -> Analysis {
        let mut errors = Vec::new();
        match self.analyze_full(candidate, &mut errors).await {
            Ok(record) => {
                self.stats.increment_analyzed();
                debug!(
                    node_id = %record.id,
                    suggested_type = %record.suggested_type,
                    confidence = record.confidence,
                    "Analyzed component"
                );
                return Analysis {
                    record: Some(record),
                    errors,
                };
            }
            Err(e) => {
                warn!(node_id = %candidate.node.id, error = %e, "Full analysis failed, retrying with basic analysis");
                errors.push(e);
            }
        }

        match self.analyze_basic(candidate) {
            Ok(record) => {
                self.stats.increment_degraded();
                Analysis {
                    record: Some(record),
                    errors,
                }
            }
            Err(e) => {
                warn!(node_id = %candidate.node.id, error = %e, "Basic analysis failed, dropping component");
                self.stats.increment_dropped();
                errors.push(e);
                Analysis {
                    record: None,
                    errors,
                }
            }
        }
    }

    async fn analyze_full(
        &self,
        candidate: &Candidate,
        errors: &mut Vec<ScanError>,
    ) -> Result<ComponentRecord, ScanError> {
        let node = &candidate.node;
        if node.id.is_empty() {
            return Err(ScanError::analysis("", "component has no id"));
        }
        if !node.has_finite_geometry() {
            return Err(ScanError::analysis(&node.id, "non-finite geometry"));
        }

        let (suggested_type, confidence) = classify(&node.name);
        let mut record = ComponentRecord::basic(&node.id, &node.name, suggested_type, confidence);
        record.is_from_library = node.is_remote();
        record.variant_options = variant_options(node);
        record.page_info = Some(candidate.page.clone());

        let Some(rep) = representative(node) else {
            return Ok(record);
        };
        if !rep.has_finite_geometry() {
            return Err(ScanError::analysis(
                &node.id,
                format!("representative {} has non-finite geometry", rep.id),
            ));
        }

        let thresholds = &self.config.thresholds;
        record.text_slots = text_slots(rep, thresholds);

        let slots = component_slots(self.host, &node.id, rep).await;
        for _ in &slots.errors {
            self.stats.increment_slot_failures();
        }
        errors.extend(slots.errors);
        record.component_slots = slots.slots;

        record.layout_behavior = layout_behavior(rep, thresholds);
        record.style_context = Some(style_context(&node.name, rep, self.registry));
        record.internal_padding = infer_padding(rep, thresholds);
        Ok(record)
    }

    fn analyze_basic(&self, candidate: &Candidate) -> Result<ComponentRecord, ScanError> {
        let node = &candidate.node;
        if node.id.is_empty() {
            return Err(ScanError::basic_analysis("", "component has no id"));
        }
        let (suggested_type, confidence) = classify(&node.name);
        let mut record = ComponentRecord::basic(
            &node.id,
            &node.name,
            suggested_type,
            basic_confidence(confidence, self.config.basic_confidence_penalty),
        );
        record.variant_options = variant_options(node);
        record.page_info = Some(candidate.page.clone());
        Ok(record)
    }
}
