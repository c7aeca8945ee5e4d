//! Local tangent frame tracking.

use contracts::{Quaternion, StampedPose, Vector3};
use nalgebra::Vector3 as NaVector3;

use crate::corrector::CorrectedPose;

/// Re-origins corrected poses relative to the first one seen
///
/// The origin is captured exactly once per tracker instance and never
/// updated afterwards, even if later fixes are more accurate; a stable,
/// non-jumping local frame matters more than absolute accuracy here. A new
/// run gets a fresh tracker.
#[derive(Debug, Default)]
pub struct LocalFrameTracker {
    origin: Option<NaVector3<f64>>,
}

impl LocalFrameTracker {
    /// Create a tracker with an unset origin
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured origin, if any record was accepted yet
    pub fn origin(&self) -> Option<&NaVector3<f64>> {
        self.origin.as_ref()
    }

    /// Re-origin one corrected pose
    ///
    /// The first call captures the translation as the run origin, so the
    /// first output translation is exactly (0, 0, 0).
    pub fn observe(&mut self, timestamp: f64, pose: &CorrectedPose) -> StampedPose {
        let origin = *self.origin.get_or_insert(pose.translation);
        let local = pose.translation - origin;
        let q = pose.rotation.quaternion();

        StampedPose {
            timestamp,
            translation: Vector3::new(local.x, local.y, local.z),
            rotation: Quaternion {
                w: q.w,
                x: q.i,
                y: q.j,
                z: q.k,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::UnitQuaternion;

    fn pose(x: f64, y: f64, z: f64) -> CorrectedPose {
        CorrectedPose {
            translation: NaVector3::new(x, y, z),
            rotation: UnitQuaternion::from_axis_angle(&NaVector3::z_axis(), 0.3),
        }
    }

    #[test]
    fn test_first_pose_is_at_origin() {
        let mut tracker = LocalFrameTracker::new();
        assert!(tracker.origin().is_none());

        let out = tracker.observe(0.0, &pose(500_000.0, 3_300_000.0, 12.0));
        assert_eq!(out.translation, contracts::Vector3::new(0.0, 0.0, 0.0));
        assert!(tracker.origin().is_some());
    }

    #[test]
    fn test_subsequent_poses_are_origin_relative() {
        let mut tracker = LocalFrameTracker::new();
        tracker.observe(0.0, &pose(100.0, 200.0, 3.0));
        let out = tracker.observe(1.0, &pose(101.5, 198.0, 3.0));
        assert_eq!(out.translation, contracts::Vector3::new(1.5, -2.0, 0.0));
        assert_eq!(out.timestamp, 1.0);
    }

    #[test]
    fn test_origin_is_never_updated() {
        let mut tracker = LocalFrameTracker::new();
        tracker.observe(0.0, &pose(100.0, 100.0, 0.0));
        let origin = *tracker.origin().unwrap();
        tracker.observe(1.0, &pose(500.0, 500.0, 0.0));
        tracker.observe(2.0, &pose(900.0, 900.0, 0.0));
        assert_eq!(*tracker.origin().unwrap(), origin);
    }

    #[test]
    fn test_orientation_passes_through() {
        let mut tracker = LocalFrameTracker::new();
        let p = pose(1.0, 2.0, 3.0);
        let out = tracker.observe(0.0, &p);
        let q = p.rotation.quaternion();
        assert_eq!(out.rotation.w, q.w);
        assert_eq!(out.rotation.z, q.k);
    }
}
