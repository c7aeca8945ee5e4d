//! PoseSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for pose sinks.

use crate::{PipelineError, StampedPose};

/// Pose output trait
///
/// All sink implementations must implement this trait. Sinks are invoked
/// synchronously, in registration order, one pose at a time; an
/// implementation must not block indefinitely.
#[trait_variant::make(PoseSink: Send)]
pub trait LocalPoseSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one output pose
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, pose: &StampedPose) -> Result<(), PipelineError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), PipelineError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), PipelineError>;
}
