//! Conversion metric collection.
//!
//! Recorder functions feed the process-wide `metrics` registry (exported via
//! Prometheus when enabled); `ConversionStatsAggregator` keeps an in-memory
//! copy for the end-of-run summary.

use std::collections::HashMap;

use contracts::StampedPose;
use metrics::{counter, gauge, histogram};

/// Record one record pulled from the source
pub fn record_record_received() {
    counter!("gnss_pose_source_records_total").increment(1);
}

/// Record one record dropped by the conversion stream
pub fn record_record_dropped(reason: &'static str) {
    counter!("gnss_pose_dropped_total", "reason" => reason).increment(1);
}

/// Record one emitted output pose
pub fn record_pose_emitted(pose: &StampedPose) {
    counter!("gnss_pose_emitted_total").increment(1);

    gauge!("gnss_pose_last_timestamp").set(pose.timestamp);
    gauge!("gnss_pose_local_east_m").set(pose.translation.x);
    gauge!("gnss_pose_local_north_m").set(pose.translation.y);
    gauge!("gnss_pose_local_up_m").set(pose.translation.z);

    let horizontal =
        (pose.translation.x.powi(2) + pose.translation.y.powi(2)).sqrt();
    histogram!("gnss_pose_horizontal_range_m").record(horizontal);
}

/// Record a pose dispatch to a sink
pub fn record_pose_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "gnss_pose_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Conversion statistics aggregator
///
/// Aggregates in memory for the end-of-run summary printout.
#[derive(Debug, Clone, Default)]
pub struct ConversionStatsAggregator {
    /// Records pulled from the source
    pub records_received: u64,

    /// Poses emitted
    pub poses_emitted: u64,

    /// Drop counts per reason
    pub dropped: HashMap<&'static str, u64>,

    /// Sink write failures
    pub sink_failures: u64,

    /// Local east coordinate statistics (meters)
    pub east_stats: RunningStats,

    /// Local north coordinate statistics (meters)
    pub north_stats: RunningStats,
}

impl ConversionStatsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record pulled from the source
    pub fn record_received(&mut self) {
        self.records_received += 1;
    }

    /// Count a dropped record
    pub fn record_dropped(&mut self, reason: &'static str) {
        *self.dropped.entry(reason).or_insert(0) += 1;
    }

    /// Count an emitted pose
    pub fn pose_emitted(&mut self, pose: &StampedPose) {
        self.poses_emitted += 1;
        self.east_stats.push(pose.translation.x);
        self.north_stats.push(pose.translation.y);
    }

    /// Count sink write failures for one pose
    pub fn sink_failures(&mut self, count: usize) {
        self.sink_failures += count as u64;
    }

    /// Total dropped records across reasons
    pub fn total_dropped(&self) -> u64 {
        self.dropped.values().sum()
    }

    /// Generate summary report
    pub fn summary(&self) -> ConversionSummary {
        ConversionSummary {
            records_received: self.records_received,
            poses_emitted: self.poses_emitted,
            total_dropped: self.total_dropped(),
            drop_rate: if self.records_received > 0 {
                self.total_dropped() as f64 / self.records_received as f64 * 100.0
            } else {
                0.0
            },
            sink_failures: self.sink_failures,
            dropped_by_reason: self
                .dropped
                .iter()
                .map(|(reason, count)| (reason.to_string(), *count))
                .collect(),
            east_m: StatsSummary::from(&self.east_stats),
            north_m: StatsSummary::from(&self.north_stats),
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Metrics summary
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    pub records_received: u64,
    pub poses_emitted: u64,
    pub total_dropped: u64,
    pub drop_rate: f64,
    pub sink_failures: u64,
    pub dropped_by_reason: HashMap<String, u64>,
    pub east_m: StatsSummary,
    pub north_m: StatsSummary,
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Conversion Summary ===")?;
        writeln!(f, "Records received: {}", self.records_received)?;
        writeln!(f, "Poses emitted: {}", self.poses_emitted)?;
        writeln!(
            f,
            "Dropped records: {} ({:.2}%)",
            self.total_dropped, self.drop_rate
        )?;
        writeln!(f, "Sink failures: {}", self.sink_failures)?;
        writeln!(f, "Local east (m): {}", self.east_m)?;
        writeln!(f, "Local north (m): {}", self.north_m)?;

        if !self.dropped_by_reason.is_empty() {
            writeln!(f, "Drop reasons:")?;
            for (reason, count) in &self.dropped_by_reason {
                writeln!(f, "  {}: {}", reason, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics calculator (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
            return;
        }

        self.min = self.min.min(value);
        self.max = self.max.max(value);

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean value
    pub fn mean(&self) -> f64 {
        if self.count > 0 {
            self.mean
        } else {
            0.0
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        if self.count > 1 {
            (self.m2 / (self.count - 1) as f64).sqrt()
        } else {
            0.0
        }
    }
}
