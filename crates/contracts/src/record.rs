//! GnssRecord - Ingestion output
//!
//! One raw GNSS/RTK observation as read from the receiver log.

use serde::{Deserialize, Serialize};

/// Raw GNSS observation
///
/// Flows by value through the conversion pipeline and is consumed exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GnssRecord {
    /// Unix timestamp (seconds, f64) - primary clock
    pub timestamp: f64,

    /// Geodetic latitude (degrees)
    pub latitude: f64,

    /// Geodetic longitude (degrees)
    pub longitude: f64,

    /// Ellipsoidal altitude (meters)
    pub altitude: f64,

    /// Dual-antenna heading (degrees, clockwise from true north on the
    /// reference hardware)
    pub heading: f64,

    /// RTK solution quality
    pub status: FixStatus,
}

/// RTK solution quality flag
///
/// Encoded GGA-style in the input logs: 0 invalid, 1 autonomous,
/// 5 float, 4 fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    /// No usable solution
    Invalid,
    /// Single-point (autonomous) solution, meter-level
    Autonomous,
    /// RTK float solution, decimeter-level
    RtkFloat,
    /// RTK fixed solution, centimeter-level
    RtkFixed,
}

impl FixStatus {
    /// Decode the integer quality flag carried by the input log
    pub fn from_flag(flag: u8) -> Self {
        match flag {
            4 => Self::RtkFixed,
            5 => Self::RtkFloat,
            1 | 2 => Self::Autonomous,
            _ => Self::Invalid,
        }
    }

    /// Encode back to the log's integer flag
    pub fn as_flag(self) -> u8 {
        match self {
            Self::RtkFixed => 4,
            Self::RtkFloat => 5,
            Self::Autonomous => 1,
            Self::Invalid => 0,
        }
    }
}
