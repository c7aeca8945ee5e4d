//! # Dispatcher
//!
//! Pose output module.
//!
//! Responsibilities:
//! - Build sinks from `SinkConfig`
//! - Fan poses out to every sink, synchronously and in registration order
//! - Bridge poses to an optional external 3D viewer

pub mod error;
pub mod router;
pub mod sinks;
pub mod viz;

pub use contracts::{PoseSink, StampedPose};
pub use error::DispatcherError;
pub use router::PoseRouter;
pub use sinks::{LogSink, TrajectorySink, UdpSink};
pub use viz::UdpVisualizer;
