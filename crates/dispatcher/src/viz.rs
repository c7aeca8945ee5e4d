//! UdpVisualizer - bridge to an external 3D trajectory viewer
//!
//! Streams each pose to the viewer as a JSON datagram. The viewer can end
//! the run early by sending any datagram back; `should_stop` polls for it
//! without blocking.

use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};

use contracts::{PipelineError, StampedPose, Visualizer};
use tracing::{debug, error, info};

/// UDP bridge implementing the `Visualizer` capability
pub struct UdpVisualizer {
    socket: Option<UdpSocket>,
    addr: String,
    stop_requested: AtomicBool,
}

impl UdpVisualizer {
    /// Connect the bridge to a viewer address
    ///
    /// The socket is ready once this returns; `shutdown` releases it.
    pub fn connect(addr: &str) -> Result<Self, PipelineError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .and_then(|s| {
                s.connect(addr)?;
                s.set_nonblocking(true)?;
                Ok(s)
            })
            .map_err(|e| PipelineError::viz(format!("cannot reach viewer at {addr}: {e}")))?;

        info!(addr, "Visualization bridge connected");

        Ok(Self {
            socket: Some(socket),
            addr: addr.to_string(),
            stop_requested: AtomicBool::new(false),
        })
    }
}

impl Visualizer for UdpVisualizer {
    fn update(&mut self, pose: &StampedPose) -> Result<(), PipelineError> {
        let Some(socket) = self.socket.as_ref() else {
            return Ok(());
        };

        let data = serde_json::to_vec(pose)
            .map_err(|e| PipelineError::viz(format!("json error: {e}")))?;

        // Best-effort: a missing viewer must never stall the pipeline
        if let Err(e) = socket.send(&data) {
            if e.kind() != std::io::ErrorKind::WouldBlock {
                error!(addr = %self.addr, error = %e, "viewer send failed");
            }
        }
        Ok(())
    }

    fn should_stop(&self) -> bool {
        if self.stop_requested.load(Ordering::Relaxed) {
            return true;
        }

        let Some(socket) = self.socket.as_ref() else {
            return false;
        };

        // Any datagram from the viewer counts as a stop request
        let mut buf = [0u8; 16];
        if socket.recv(&mut buf).is_ok() {
            info!(addr = %self.addr, "viewer requested stop");
            self.stop_requested.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn shutdown(&mut self) {
        self.socket = None;
        debug!(addr = %self.addr, "Visualization bridge closed");
    }
}
