//! Pipeline orchestrator - coordinates all components.
//!
//! Record source → conversion stream → sink router (+ optional viewer
//! bridge), one record at a time: each record is fully converted and
//! dispatched before the next one is read.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{RecordSource, RunBlueprint, Visualizer};
use dispatcher::{PoseRouter, UdpVisualizer};
use ingestion::TxtRecordSource;
use observability::{
    record_pose_dispatched, record_pose_emitted, record_record_dropped, record_record_received,
    ConversionStatsAggregator,
};
use pose_engine::GnssPoseStream;
use tracing::{info, warn};

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The run blueprint
    pub blueprint: RunBlueprint,

    /// Maximum number of poses to emit (None = unlimited)
    pub max_poses: Option<u64>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Open the record source - nothing to process without one
        info!(path = %blueprint.input.path, "Opening record source...");
        let mut source = TxtRecordSource::open(&blueprint.input.path)
            .with_context(|| format!("Failed to open input log '{}'", blueprint.input.path))?;

        // Conversion stream
        let mut stream = GnssPoseStream::new(&blueprint.antenna, &blueprint.conversion);
        info!(
            antenna_angle = blueprint.antenna.mount_angle_deg,
            quality = ?blueprint.conversion.quality,
            "Conversion stream configured"
        );

        // Sink router
        if blueprint.sinks.is_empty() {
            warn!("No sinks configured - output poses will be dropped");
        }
        let mut router = PoseRouter::from_configs(&blueprint.sinks)
            .await
            .context("Failed to create sink router")?;
        let active_sinks = router.len();
        info!(active_sinks, "Sink router started");

        // Optional viewer bridge
        let mut viz: Option<UdpVisualizer> = if blueprint.viz.enabled {
            let bridge = UdpVisualizer::connect(&blueprint.viz.addr)
                .with_context(|| format!("Failed to reach viewer at {}", blueprint.viz.addr))?;
            Some(bridge)
        } else {
            None
        };

        info!(max_poses = ?self.config.max_poses, "Pipeline running");

        // Per-record loop: convert and dispatch synchronously
        let mut stats_agg = ConversionStatsAggregator::new();
        let mut stopped_by_viewer = false;

        while let Some(record) = source.next_record()? {
            record_record_received();
            stats_agg.record_received();

            let pose = match stream.process(&record) {
                Ok(pose) => pose,
                Err(e) => {
                    record_record_dropped(e.reason());
                    stats_agg.record_dropped(e.reason());
                    warn!(
                        timestamp = record.timestamp,
                        reason = e.reason(),
                        error = %e,
                        "Record dropped"
                    );
                    continue;
                }
            };

            record_pose_emitted(&pose);
            stats_agg.pose_emitted(&pose);

            let failures = router.write_all(&pose).await;
            stats_agg.sink_failures(failures);
            if active_sinks > 0 {
                record_pose_dispatched("all", failures == 0);
            }

            if let Some(bridge) = viz.as_mut() {
                if let Err(e) = bridge.update(&pose) {
                    warn!(error = %e, "Viewer update failed");
                }
                if bridge.should_stop() {
                    info!("Viewer requested stop");
                    stopped_by_viewer = true;
                    break;
                }
            }

            // Check max poses limit
            if let Some(max) = self.config.max_poses {
                if stats_agg.poses_emitted >= max {
                    info!(poses = stats_agg.poses_emitted, "Reached max poses limit");
                    break;
                }
            }
        }

        // Shutdown
        info!("Shutting down pipeline...");
        router.flush_all().await;
        router.close_all().await;
        if let Some(mut bridge) = viz.take() {
            bridge.shutdown();
        }

        let source_metrics = source.metrics().snapshot();
        let stats = PipelineStats {
            records_received: stats_agg.records_received,
            poses_emitted: stats_agg.poses_emitted,
            records_dropped: stats_agg.total_dropped(),
            malformed_lines: source_metrics.parse_errors,
            sink_failures: stats_agg.sink_failures,
            duration: start_time.elapsed(),
            active_sinks,
            stopped_by_viewer,
            conversion_stats: stats_agg,
        };

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            poses_per_sec = format!("{:.2}", stats.pose_rate()),
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }
}
