//! Source-side counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Record source metrics
#[derive(Debug, Default)]
pub struct SourceMetrics {
    /// Total GNSS records produced
    pub records_produced: AtomicU64,

    /// Lines carrying another sensor's tag
    pub lines_skipped: AtomicU64,

    /// Malformed GNSS lines
    pub parse_errors: AtomicU64,
}

impl SourceMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a produced record
    pub fn record_produced(&self) {
        self.records_produced.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped foreign line
    pub fn record_skipped(&self) {
        self.lines_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a malformed line
    pub fn record_parse_error(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_produced: self.records_produced.load(Ordering::Relaxed),
            lines_skipped: self.lines_skipped.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    /// Total GNSS records produced
    pub records_produced: u64,

    /// Lines carrying another sensor's tag
    pub lines_skipped: u64,

    /// Malformed GNSS lines
    pub parse_errors: u64,
}
