//! TrajectorySink - append-only trajectory text log
//!
//! One line per pose:
//!
//! ```text
//! <timestamp> <tx> <ty> <tz> <qw> <qx> <qy> <qz>
//! ```
//!
//! The timestamp is rendered with 18 significant digits, pose fields with 9,
//! matching the downstream plotting tools.

use contracts::{PipelineError, PoseSink, StampedPose};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Significant digits for the timestamp column
const TIMESTAMP_DIGITS: usize = 18;
/// Significant digits for translation/quaternion columns
const POSE_DIGITS: usize = 9;

/// Configuration for TrajectorySink
#[derive(Debug, Clone)]
pub struct TrajectorySinkConfig {
    /// Output file path
    pub path: PathBuf,
}

impl TrajectorySinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .ok_or_else(|| "missing 'path' parameter".to_string())?;
        Ok(Self { path })
    }
}

/// Sink that appends poses to a trajectory text file
pub struct TrajectorySink {
    name: String,
    writer: BufWriter<File>,
}

impl TrajectorySink {
    /// Create a new TrajectorySink
    ///
    /// Parent directories are created; an existing file is appended to
    /// (single writer, no locking).
    pub fn new(name: impl Into<String>, config: TrajectorySinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        Ok(Self {
            name: name.into(),
            writer: BufWriter::new(file),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, PipelineError> {
        let name = name.into();
        let config = TrajectorySinkConfig::from_params(params)
            .map_err(|e| PipelineError::sink_write(&name, e))?;
        Self::new(&name, config).map_err(|e| PipelineError::sink_write(&name, e.to_string()))
    }

    fn write_line(&mut self, pose: &StampedPose) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "{} {} {} {} {} {} {} {}",
            format_sig(pose.timestamp, TIMESTAMP_DIGITS),
            format_sig(pose.translation.x, POSE_DIGITS),
            format_sig(pose.translation.y, POSE_DIGITS),
            format_sig(pose.translation.z, POSE_DIGITS),
            format_sig(pose.rotation.w, POSE_DIGITS),
            format_sig(pose.rotation.x, POSE_DIGITS),
            format_sig(pose.rotation.y, POSE_DIGITS),
            format_sig(pose.rotation.z, POSE_DIGITS),
        )
    }
}

/// Render a value with the given number of significant digits
///
/// Plain decimal notation (no exponent), as the downstream plotting scripts
/// expect.
fn format_sig(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits - 1, value);
    }
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}

impl PoseSink for TrajectorySink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "trajectory_sink_write",
        skip(self, pose),
        fields(sink = %self.name, timestamp = pose.timestamp)
    )]
    async fn write(&mut self, pose: &StampedPose) -> Result<(), PipelineError> {
        self.write_line(pose).map_err(|e| {
            error!(sink = %self.name, error = %e, "Write failed");
            PipelineError::sink_write(&self.name, e.to_string())
        })
    }

    #[instrument(name = "trajectory_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), PipelineError> {
        self.writer
            .flush()
            .map_err(|e| PipelineError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "trajectory_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), PipelineError> {
        self.writer
            .flush()
            .map_err(|e| PipelineError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, "TrajectorySink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Quaternion, Vector3};
    use tempfile::tempdir;

    fn pose(timestamp: f64, x: f64, y: f64) -> StampedPose {
        StampedPose {
            timestamp,
            translation: Vector3::new(x, y, 0.0),
            rotation: Quaternion::default(),
        }
    }

    #[test]
    fn test_format_sig_counts_significant_digits() {
        assert_eq!(format_sig(123.456789012, 9), "123.456789");
        assert_eq!(format_sig(-0.5, 9), "-0.500000000");
        assert_eq!(format_sig(1624426287.191, 18), "1624426287.19100000");
        // More integer digits than requested: keep the integer part intact
        assert_eq!(format_sig(1234.0, 3), "1234");
    }

    #[test]
    fn test_format_sig_zero() {
        assert_eq!(format_sig(0.0, 9), "0.00000000");
    }

    #[tokio::test]
    async fn test_trajectory_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.txt");
        let config = TrajectorySinkConfig { path: path.clone() };

        let mut sink = TrajectorySink::new("traj", config).unwrap();
        sink.write(&pose(0.0, 0.0, 0.0)).await.unwrap();
        sink.write(&pose(1.0, 1.5, 11.06)).await.unwrap();
        sink.flush().await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split_whitespace().count(), 8);
        assert!(lines[1].starts_with("1.00000000000000000 1.50000000 11.0600000"));
    }

    #[tokio::test]
    async fn test_reopen_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.txt");

        for t in [0.0, 1.0] {
            let mut sink =
                TrajectorySink::new("traj", TrajectorySinkConfig { path: path.clone() }).unwrap();
            sink.write(&pose(t, 0.0, 0.0)).await.unwrap();
            sink.close().await.unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_from_params_requires_path() {
        let result = TrajectorySink::from_params("traj", &HashMap::new());
        assert!(result.is_err());
    }
}
