//! UdpSink - UDP fire-and-forget pose streaming

use contracts::{PipelineError, PoseSink, StampedPose};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, error, instrument};

/// Configuration for UdpSink
#[derive(Debug, Clone)]
pub struct UdpSinkConfig {
    /// Target address
    pub addr: SocketAddr,
}

impl UdpSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let addr_str = params
            .get("addr")
            .ok_or_else(|| "missing 'addr' parameter".to_string())?;

        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e| format!("invalid address '{}': {}", addr_str, e))?;

        Ok(Self { addr })
    }
}

/// Sink that sends poses over UDP as JSON datagrams
pub struct UdpSink {
    name: String,
    socket: Option<UdpSocket>,
}

impl UdpSink {
    /// Create a new UdpSink
    #[instrument(name = "udp_sink_new", skip(name, config))]
    pub async fn new(name: impl Into<String>, config: UdpSinkConfig) -> std::io::Result<Self> {
        let name = name.into();
        // Bind to any available port
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(&config.addr).await?;

        debug!(
            sink = %name,
            target = %config.addr,
            "UdpSink connected"
        );

        Ok(Self {
            name,
            socket: Some(socket),
        })
    }

    /// Create from params (for factory)
    #[instrument(name = "udp_sink_from_params", skip(name, params))]
    pub async fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, PipelineError> {
        let name = name.into();
        let config = UdpSinkConfig::from_params(params)
            .map_err(|e| PipelineError::sink_write(&name, e))?;

        Self::new(&name, config)
            .await
            .map_err(|e| PipelineError::SinkConnection {
                sink_name: name,
                message: e.to_string(),
            })
    }

    fn socket(&self) -> Result<&UdpSocket, PipelineError> {
        self.socket
            .as_ref()
            .ok_or_else(|| PipelineError::sink_write(&self.name, "socket not connected"))
    }

    fn serialize_pose(&self, pose: &StampedPose) -> Result<Vec<u8>, PipelineError> {
        serde_json::to_vec(pose)
            .map_err(|e| PipelineError::sink_write(&self.name, format!("json error: {e}")))
    }
}

impl PoseSink for UdpSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "udp_sink_write",
        skip(self, pose),
        fields(sink = %self.name, timestamp = pose.timestamp)
    )]
    async fn write(&mut self, pose: &StampedPose) -> Result<(), PipelineError> {
        let data = self.serialize_pose(pose)?;
        match self.socket()?.send(&data).await {
            Ok(sent) => {
                debug!(sink = %self.name, bytes = sent, "Sent");
            }
            Err(e) => {
                // Log but don't fail - UDP is best-effort
                error!(sink = %self.name, error = %e, "UDP send failed");
            }
        }
        Ok(())
    }

    #[instrument(name = "udp_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PipelineError> {
        // UDP doesn't buffer
        Ok(())
    }

    #[instrument(name = "udp_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PipelineError> {
        self.socket = None;
        debug!(sink = %self.name, "UdpSink closed");
        Ok(())
    }
}
