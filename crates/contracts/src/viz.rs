//! Visualizer trait - Optional 3D view bridge
//!
//! The orchestrator may hold a visualizer; the pipeline never requires one.

use crate::{PipelineError, StampedPose};

/// Live 3D view of the output trajectory
///
/// The implementation owns its lifecycle: it is ready once constructed and
/// released by `shutdown`. `update` and `should_stop` are the only
/// interactions the pipeline has with it.
pub trait Visualizer: Send {
    /// Push one pose to the view
    fn update(&mut self, pose: &StampedPose) -> Result<(), PipelineError>;

    /// Poll whether the viewer asked the run to stop
    fn should_stop(&self) -> bool;

    /// Release the view
    fn shutdown(&mut self);
}
