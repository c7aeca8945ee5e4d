//! RunBlueprint - Config Loader output
//!
//! Describes one complete processing run: input log, antenna extrinsics,
//! conversion policy, output routing, optional visualization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Blueprint version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete run blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunBlueprint {
    /// Blueprint version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Input record source
    pub input: InputConfig,

    /// Antenna extrinsics
    #[serde(default)]
    pub antenna: AntennaConfig,

    /// Conversion policy
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Output routing
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,

    /// Optional 3D visualization bridge
    #[serde(default)]
    pub viz: VizConfig,
}

/// Input record source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the receiver text log
    pub path: String,
}

/// Antenna extrinsics: fixed for a run, never mutated during processing
///
/// Defaults match the reference hardware the sample logs were recorded with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AntennaConfig {
    /// Installation angle of the antenna baseline relative to the body
    /// forward axis (degrees)
    #[serde(default = "default_mount_angle")]
    pub mount_angle_deg: f64,

    /// Antenna offset from the body origin, forward axis (meters)
    #[serde(default = "default_offset_x")]
    pub offset_x: f64,

    /// Antenna offset from the body origin, left axis (meters)
    #[serde(default = "default_offset_y")]
    pub offset_y: f64,
}

impl Default for AntennaConfig {
    fn default() -> Self {
        Self {
            mount_angle_deg: default_mount_angle(),
            offset_x: default_offset_x(),
            offset_y: default_offset_y(),
        }
    }
}

fn default_mount_angle() -> f64 {
    12.06
}

fn default_offset_x() -> f64 {
    -0.17
}

fn default_offset_y() -> f64 {
    -0.20
}

/// Conversion policy knobs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Which fix qualities are accepted
    #[serde(default)]
    pub quality: QualityPolicy,

    /// What to do with the raw altitude
    #[serde(default)]
    pub altitude: AltitudeMode,

    /// Heading sign/axis convention of the receiver
    #[serde(default)]
    pub heading: HeadingConvention,

    /// Pin the UTM zone instead of deriving it from the first accepted
    /// record. Zone changes mid-run are an error either way.
    #[serde(default)]
    pub fixed_zone: Option<u8>,
}

/// Fix quality acceptance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPolicy {
    /// Only fully resolved RTK fixes
    #[default]
    RtkFixed,
    /// RTK fixed or float
    RtkFloat,
}

/// Altitude handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeMode {
    /// Raw record altitude becomes the pose z
    #[default]
    Passthrough,
    /// Pose z fixed at zero (flat ground)
    Zero,
}

/// Heading sign/axis convention
///
/// Mismatching the receiver's convention produces self-consistent but wrong
/// output; validate against a known ground-truth segment after changing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingConvention {
    /// Degrees clockwise from true north (reference hardware)
    #[default]
    NorthClockwise,
    /// Degrees counter-clockwise from east (math convention, identity)
    EastCounterClockwise,
}

/// Visualization bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizConfig {
    /// Whether a viewer bridge is attached
    #[serde(default)]
    pub enabled: bool,

    /// Viewer datagram address
    #[serde(default = "default_viz_addr")]
    pub addr: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: default_viz_addr(),
        }
    }
}

fn default_viz_addr() -> String {
    "127.0.0.1:9870".to_string()
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Structured log line per pose
    Log,
    /// Append-only trajectory text file
    Trajectory,
    /// JSON datagram per pose (UDP)
    Udp,
}

impl RunBlueprint {
    /// Sinks of a given type (diagnostics/summary helpers)
    pub fn sinks_of_type(&self, kind: SinkType) -> impl Iterator<Item = &SinkConfig> {
        self.sinks.iter().filter(move |s| s.sink_type == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antenna_defaults_match_reference_hardware() {
        let antenna = AntennaConfig::default();
        assert!((antenna.mount_angle_deg - 12.06).abs() < 1e-12);
        assert!((antenna.offset_x + 0.17).abs() < 1e-12);
        assert!((antenna.offset_y + 0.20).abs() < 1e-12);
    }

    #[test]
    fn conversion_defaults() {
        let conv = ConversionConfig::default();
        assert_eq!(conv.quality, QualityPolicy::RtkFixed);
        assert_eq!(conv.altitude, AltitudeMode::Passthrough);
        assert_eq!(conv.heading, HeadingConvention::NorthClockwise);
        assert_eq!(conv.fixed_zone, None);
    }

    #[test]
    fn minimal_blueprint_deserializes() {
        let json = r#"{
            "input": { "path": "data/gnss.txt" },
            "sinks": [{ "name": "traj", "sink_type": "trajectory" }]
        }"#;
        let bp: RunBlueprint = serde_json::from_str(json).unwrap();
        assert_eq!(bp.input.path, "data/gnss.txt");
        assert_eq!(bp.sinks.len(), 1);
        assert_eq!(bp.sinks[0].sink_type, SinkType::Trajectory);
        assert!(!bp.viz.enabled);
        assert_eq!(bp.sinks_of_type(SinkType::Trajectory).count(), 1);
        assert_eq!(bp.sinks_of_type(SinkType::Log).count(), 0);
    }
}
