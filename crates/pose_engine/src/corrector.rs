//! Antenna extrinsic compensation.
//!
//! The antenna sits at a fixed planar offset from the body origin and its
//! baseline is installed at a fixed angle to the body forward axis. Both are
//! removed here: the reported heading is rotated by the installation angle,
//! then the offset, rotated into the corrected heading, is subtracted from
//! the projected antenna position to recover the body position.

use contracts::{AltitudeMode, AntennaConfig, HeadingConvention};
use nalgebra::{Rotation2, UnitQuaternion, Vector2, Vector3};

use crate::projector::ProjectedPoint;

/// Body pose after lever-arm and heading correction
///
/// Still in absolute UTM coordinates; the local-frame tracker re-origins it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedPose {
    /// Absolute translation (easting, northing, z)
    pub translation: Vector3<f64>,

    /// Body orientation, yaw-only (roll/pitch unobservable from GNSS)
    pub rotation: UnitQuaternion<f64>,
}

/// Antenna lever-arm / mounting-angle corrector
///
/// Pure: holds only run-constant configuration.
#[derive(Debug, Clone)]
pub struct AntennaCorrector {
    offset: Vector2<f64>,
    mount_angle_rad: f64,
    convention: HeadingConvention,
    altitude_mode: AltitudeMode,
}

impl AntennaCorrector {
    /// Build a corrector from the run's antenna extrinsics
    pub fn new(
        antenna: &AntennaConfig,
        convention: HeadingConvention,
        altitude_mode: AltitudeMode,
    ) -> Self {
        Self {
            offset: Vector2::new(antenna.offset_x, antenna.offset_y),
            mount_angle_rad: antenna.mount_angle_deg.to_radians(),
            convention,
            altitude_mode,
        }
    }

    /// Math yaw (radians, counter-clockwise from east) of a reported heading
    fn antenna_yaw(&self, heading_deg: f64) -> f64 {
        match self.convention {
            HeadingConvention::NorthClockwise => (90.0 - heading_deg).to_radians(),
            HeadingConvention::EastCounterClockwise => heading_deg.to_radians(),
        }
    }

    /// Correct a projected antenna position into a body pose
    pub fn correct(
        &self,
        point: &ProjectedPoint,
        altitude: f64,
        heading_deg: f64,
    ) -> CorrectedPose {
        let body_yaw = self.antenna_yaw(heading_deg) - self.mount_angle_rad;

        // Lever arm: the offset expressed in the world frame at the current
        // body heading, subtracted from the antenna position
        let lever = Rotation2::new(body_yaw) * self.offset;

        let z = match self.altitude_mode {
            AltitudeMode::Passthrough => altitude,
            AltitudeMode::Zero => 0.0,
        };

        CorrectedPose {
            translation: Vector3::new(point.easting - lever.x, point.northing - lever.y, z),
            rotation: UnitQuaternion::from_axis_angle(&Vector3::z_axis(), body_yaw),
        }
    }
}
