//! Scan statistics with atomic counters.
//!
//! [`ScanStats`] is shared by the concurrent per-component analyses and
//! [`StatsSnapshot`] is the serializable view returned with every report.
//!
//! # Examples
//!
//! ```
//! use ds_scanner::ScanStats;
//!
//! let stats = ScanStats::new();
//! stats.increment_found();
//! stats.increment_analyzed();
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.found, 1);
//! assert_eq!(snapshot.analyzed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for scan statistics.
///
/// Uses relaxed ordering; the values are informational.
#[derive(Debug, Default)]
pub struct ScanStats {
    pages_scanned: AtomicU64,
    pages_skipped: AtomicU64,
    found: AtomicU64,
    analyzed: AtomicU64,
    degraded: AtomicU64,
    dropped: AtomicU64,
    duplicates: AtomicU64,
    slot_failures: AtomicU64,
    token_fallback: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the enumerated pages counter.
    #[inline]
    pub fn increment_pages_scanned(&self) {
        self.pages_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the skipped pages counter.
    #[inline]
    pub fn increment_pages_skipped(&self) {
        self.pages_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the candidate components counter.
    #[inline]
    pub fn increment_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the fully analyzed counter.
    #[inline]
    pub fn increment_analyzed(&self) {
        self.analyzed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the basic-analysis counter.
    #[inline]
    pub fn increment_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the dropped components counter.
    #[inline]
    pub fn increment_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the duplicate id counter.
    #[inline]
    pub fn increment_duplicates(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the omitted slot counter.
    #[inline]
    pub fn increment_slot_failures(&self) {
        self.slot_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records that tokens were synthesized from color styles.
    #[inline]
    pub fn mark_token_fallback(&self) {
        self.token_fallback.store(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all statistics.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_scanned: self.pages_scanned.load(Ordering::Relaxed),
            pages_skipped: self.pages_skipped.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            analyzed: self.analyzed.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            slot_failures: self.slot_failures.load(Ordering::Relaxed),
            token_fallback: self.token_fallback.load(Ordering::Relaxed) != 0,
        }
    }
}

/// A point-in-time snapshot of scan statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Pages enumerated.
    pub pages_scanned: u64,
    /// Pages skipped after a host error.
    pub pages_skipped: u64,
    /// Candidate components found by the walker.
    pub found: u64,
    /// Components that received a full analysis.
    pub analyzed: u64,
    /// Components that fell back to basic analysis.
    pub degraded: u64,
    /// Components dropped after both analyses failed.
    pub dropped: u64,
    /// Candidates skipped because their id was already seen.
    pub duplicates: u64,
    /// Component slots omitted after a lookup failure.
    pub slot_failures: u64,
    /// Whether design tokens were synthesized from color styles.
    pub token_fallback: bool,
}

impl StatsSnapshot {
    /// Number of records in the session.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.analyzed + self.degraded
    }

    /// Share of emitted records that received a full analysis, in percent.
    #[must_use]
    pub fn full_analysis_percent(&self) -> f64 {
        let emitted = self.emitted();
        if emitted == 0 {
            return 100.0;
        }
        (self.analyzed as f64 / emitted as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counters() {
        let stats = ScanStats::new();
        stats.increment_found();
        stats.increment_found();
        stats.increment_analyzed();
        stats.increment_degraded();
        stats.increment_pages_skipped();

        let snap = stats.snapshot();
        assert_eq!(snap.found, 2);
        assert_eq!(snap.emitted(), 2);
        assert_eq!(snap.pages_skipped, 1);
        assert!(!snap.token_fallback);
        assert!((snap.full_analysis_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_snapshot_percent() {
        assert!((StatsSnapshot::default().full_analysis_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_serialization() {
        let stats = ScanStats::new();
        stats.increment_slot_failures();
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["slot_failures"], 1);
        assert_eq!(json["token_fallback"], false);
    }
}
