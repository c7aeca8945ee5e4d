//! Pipeline statistics and metrics.

use std::time::Duration;

use observability::ConversionStatsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Total records pulled from the source
    pub records_received: u64,

    /// Total poses emitted to sinks
    pub poses_emitted: u64,

    /// Total records dropped by the conversion stream
    pub records_dropped: u64,

    /// Malformed source lines skipped before conversion
    pub malformed_lines: u64,

    /// Total sink write failures
    pub sink_failures: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Number of sinks that received data
    pub active_sinks: usize,

    /// Whether the external viewer ended the run early
    pub stopped_by_viewer: bool,

    /// Conversion statistics aggregator
    pub conversion_stats: ConversionStatsAggregator,
}

impl PipelineStats {
    /// Calculate poses per second throughput
    pub fn pose_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.poses_emitted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate drop rate as percentage
    #[allow(dead_code)]
    pub fn drop_rate(&self) -> f64 {
        if self.records_received > 0 {
            (self.records_dropped as f64 / self.records_received as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Records received: {}", self.records_received);
        println!("   ├─ Poses emitted: {}", self.poses_emitted);
        println!("   ├─ Poses/sec: {:.2}", self.pose_rate());
        println!("   ├─ Active sinks: {}", self.active_sinks);
        println!("   └─ Stopped by viewer: {}", self.stopped_by_viewer);

        let summary = self.conversion_stats.summary();

        println!("\n📈 Conversion Metrics");
        println!("   ├─ Dropped records: {} ({:.2}%)", summary.total_dropped, summary.drop_rate);
        println!("   ├─ Malformed lines: {}", self.malformed_lines);
        println!("   ├─ Sink failures: {}", self.sink_failures);
        println!("   ├─ Local east (m): {}", summary.east_m);
        println!("   └─ Local north (m): {}", summary.north_m);

        if !summary.dropped_by_reason.is_empty() {
            println!("\n🗑 Drop Reasons");
            let mut reasons: Vec<_> = summary.dropped_by_reason.iter().collect();
            reasons.sort();
            for (idx, (reason, count)) in reasons.iter().enumerate() {
                let prefix = if idx + 1 == reasons.len() {
                    "└─"
                } else {
                    "├─"
                };
                println!("   {} {}: {}", prefix, reason, count);
            }
        }

        println!();
    }
}
