//! StampedPose - Pose engine output
//!
//! The externally visible pose: origin-relative translation plus a unit
//! quaternion, paired with the originating record's timestamp.

use serde::{Deserialize, Serialize};

/// 3D vector (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Unit quaternion (w, x, y, z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

/// Timestamped output pose in the local tangent frame
///
/// Translation is relative to the run origin (the first accepted fix), so
/// the very first pose of a run sits at (0, 0, 0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StampedPose {
    /// Originating record timestamp (seconds)
    pub timestamp: f64,

    /// Origin-relative translation (meters)
    pub translation: Vector3,

    /// Body orientation (yaw-only on GNSS input)
    pub rotation: Quaternion,
}
