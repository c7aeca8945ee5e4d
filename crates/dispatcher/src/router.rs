//! PoseRouter - synchronous in-order fan-out to sinks

use tracing::{debug, error, info, instrument};

use contracts::{PoseSink, SinkConfig, SinkType, StampedPose};

use crate::error::DispatcherError;
use crate::sinks::{LogSink, TrajectorySink, UdpSink};

/// A constructed sink of any supported type
///
/// Sinks are few and fixed; an enum keeps the fan-out loop free of dynamic
/// dispatch over an async trait.
enum AnySink {
    Log(LogSink),
    Trajectory(TrajectorySink),
    Udp(UdpSink),
}

impl AnySink {
    fn name(&self) -> &str {
        match self {
            Self::Log(s) => s.name(),
            Self::Trajectory(s) => s.name(),
            Self::Udp(s) => s.name(),
        }
    }

    async fn write(&mut self, pose: &StampedPose) -> Result<(), contracts::PipelineError> {
        match self {
            Self::Log(s) => s.write(pose).await,
            Self::Trajectory(s) => s.write(pose).await,
            Self::Udp(s) => s.write(pose).await,
        }
    }

    async fn flush(&mut self) -> Result<(), contracts::PipelineError> {
        match self {
            Self::Log(s) => s.flush().await,
            Self::Trajectory(s) => s.flush().await,
            Self::Udp(s) => s.flush().await,
        }
    }

    async fn close(&mut self) -> Result<(), contracts::PipelineError> {
        match self {
            Self::Log(s) => s.close().await,
            Self::Trajectory(s) => s.close().await,
            Self::Udp(s) => s.close().await,
        }
    }
}

/// Fans each pose out to every configured sink
///
/// Sinks are invoked one at a time, in registration order, on the caller's
/// task: no queues, no reordering. A slow sink therefore delays the stream
/// (implicit backpressure); a failing sink is logged and skipped for that
/// pose without affecting the others.
pub struct PoseRouter {
    sinks: Vec<AnySink>,
}

impl PoseRouter {
    /// Build a router from sink configurations, in order
    #[instrument(name = "pose_router_build", skip(configs), fields(sink_count = configs.len()))]
    pub async fn from_configs(configs: &[SinkConfig]) -> Result<Self, DispatcherError> {
        let mut sinks = Vec::with_capacity(configs.len());
        for config in configs {
            sinks.push(create_sink(config).await?);
        }
        info!(sinks = sinks.len(), "Pose router ready");
        Ok(Self { sinks })
    }

    /// Number of registered sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether any sink is registered
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Write one pose to every sink, in registration order
    ///
    /// Returns the number of sinks that failed for this pose.
    pub async fn write_all(&mut self, pose: &StampedPose) -> usize {
        let mut failures = 0;
        for sink in &mut self.sinks {
            if let Err(e) = sink.write(pose).await {
                failures += 1;
                error!(
                    sink = sink.name(),
                    timestamp = pose.timestamp,
                    error = %e,
                    "Write failed"
                );
                // Continue with the remaining sinks - one bad sink must not
                // starve the others
            }
        }
        failures
    }

    /// Flush every sink
    pub async fn flush_all(&mut self) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush().await {
                error!(sink = sink.name(), error = %e, "Flush failed");
            }
        }
    }

    /// Close every sink
    #[instrument(name = "pose_router_close", skip(self))]
    pub async fn close_all(&mut self) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.close().await {
                error!(sink = sink.name(), error = %e, "Close failed");
            }
        }
        debug!("Pose router closed");
    }
}

/// Create a sink from configuration
#[instrument(
    name = "pose_router_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
async fn create_sink(config: &SinkConfig) -> Result<AnySink, DispatcherError> {
    match config.sink_type {
        SinkType::Log => Ok(AnySink::Log(LogSink::new(&config.name))),
        SinkType::Trajectory => {
            let sink = TrajectorySink::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(AnySink::Trajectory(sink))
        }
        SinkType::Udp => {
            let sink = UdpSink::from_params(&config.name, &config.params)
                .await
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(AnySink::Udp(sink))
        }
    }
}
