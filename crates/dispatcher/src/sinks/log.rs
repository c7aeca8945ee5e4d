//! LogSink - logs pose summary via tracing

use contracts::{PipelineError, PoseSink, StampedPose};
use tracing::{info, instrument};

/// Sink that logs pose summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_pose_summary(&self, pose: &StampedPose) {
        info!(
            sink = %self.name,
            timestamp = pose.timestamp,
            x = format!("{:.3}", pose.translation.x),
            y = format!("{:.3}", pose.translation.y),
            z = format!("{:.3}", pose.translation.z),
            qw = format!("{:.6}", pose.rotation.w),
            "Pose received"
        );
    }
}

impl PoseSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, pose),
        fields(sink = %self.name, timestamp = pose.timestamp)
    )]
    async fn write(&mut self, pose: &StampedPose) -> Result<(), PipelineError> {
        self.log_pose_summary(pose);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PipelineError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PipelineError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
