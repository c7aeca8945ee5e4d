//! Main conversion stream implementation.

use contracts::{
    AntennaConfig, ConversionConfig, ConvertError, FixStatus, GnssRecord, QualityPolicy,
    StampedPose,
};
use metrics::counter;
use tracing::{debug, instrument, trace};

use crate::corrector::AntennaCorrector;
use crate::projector;
use crate::tracker::LocalFrameTracker;

/// Stream state
///
/// The transition to `Streaming` happens on the first record that passes
/// the quality policy and every conversion stage; the pinned zone travels
/// with the state so it cannot exist before that record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No record accepted yet; the local origin and the zone are unset
    AwaitingFirstFix,
    /// Origin captured, zone pinned
    Streaming { zone: u8 },
}

/// GNSS record → pose conversion stream
///
/// Stateful across one run: pins the UTM zone and the local origin on the
/// first accepted record. One instance per run; state never crosses runs.
#[derive(Debug)]
pub struct GnssPoseStream {
    corrector: AntennaCorrector,
    tracker: LocalFrameTracker,
    quality: QualityPolicy,
    fixed_zone: Option<u8>,
    state: StreamState,
}

impl GnssPoseStream {
    /// Create a new stream from the run's antenna and conversion settings
    pub fn new(antenna: &AntennaConfig, conversion: &ConversionConfig) -> Self {
        Self {
            corrector: AntennaCorrector::new(antenna, conversion.heading, conversion.altitude),
            tracker: LocalFrameTracker::new(),
            quality: conversion.quality,
            fixed_zone: conversion.fixed_zone,
            state: StreamState::AwaitingFirstFix,
        }
    }

    /// Current state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// The zone the run is pinned to, once streaming
    pub fn pinned_zone(&self) -> Option<u8> {
        match self.state {
            StreamState::Streaming { zone } => Some(zone),
            StreamState::AwaitingFirstFix => self.fixed_zone,
        }
    }

    /// Whether a fix quality passes the acceptance policy
    fn accepts(&self, status: FixStatus) -> bool {
        match self.quality {
            QualityPolicy::RtkFixed => status == FixStatus::RtkFixed,
            QualityPolicy::RtkFloat => {
                matches!(status, FixStatus::RtkFixed | FixStatus::RtkFloat)
            }
        }
    }

    /// Convert one record into an output pose
    ///
    /// Errors are record-local: the caller drops the record and continues.
    /// A record that fails any stage never pins the zone and never becomes
    /// the origin.
    #[instrument(
        level = "trace",
        name = "pose_stream_process",
        skip(self, record),
        fields(timestamp = record.timestamp, status = ?record.status)
    )]
    pub fn process(&mut self, record: &GnssRecord) -> Result<StampedPose, ConvertError> {
        counter!("gnss_pose_records_total").increment(1);

        let result = self.convert(record);
        match &result {
            Ok(pose) => {
                counter!("gnss_pose_poses_emitted_total").increment(1);
                trace!(
                    x = pose.translation.x,
                    y = pose.translation.y,
                    "pose emitted"
                );
            }
            Err(e) => {
                counter!("gnss_pose_records_dropped_total", "reason" => e.reason()).increment(1);
            }
        }
        result
    }

    fn convert(&mut self, record: &GnssRecord) -> Result<StampedPose, ConvertError> {
        if !self.accepts(record.status) {
            return Err(ConvertError::UnresolvedFix {
                status: record.status,
            });
        }

        projector::check_coordinates(record.latitude, record.longitude)?;

        let natural_zone = projector::zone_for_longitude(record.longitude);
        let zone = match self.pinned_zone() {
            Some(pinned) if pinned != natural_zone => {
                return Err(ConvertError::ZoneMismatch {
                    record_zone: natural_zone,
                    pinned_zone: pinned,
                });
            }
            Some(pinned) => pinned,
            None => natural_zone,
        };

        let point = projector::project(record.latitude, record.longitude, zone)?;
        let corrected = self
            .corrector
            .correct(&point, record.altitude, record.heading);
        let pose = self.tracker.observe(record.timestamp, &corrected);

        if self.state == StreamState::AwaitingFirstFix {
            debug!(zone, "first fix accepted, local origin pinned");
            self.state = StreamState::Streaming { zone };
        }

        Ok(pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AltitudeMode, HeadingConvention};

    fn record(timestamp: f64, lat: f64, lon: f64, status: FixStatus) -> GnssRecord {
        GnssRecord {
            timestamp,
            latitude: lat,
            longitude: lon,
            altitude: 0.0,
            heading: 0.0,
            status,
        }
    }

    fn neutral_stream() -> GnssPoseStream {
        // Zero extrinsics keep the geometry easy to reason about
        GnssPoseStream::new(
            &AntennaConfig {
                mount_angle_deg: 0.0,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            &ConversionConfig {
                quality: QualityPolicy::RtkFixed,
                altitude: AltitudeMode::Passthrough,
                heading: HeadingConvention::NorthClockwise,
                fixed_zone: None,
            },
        )
    }

    #[test]
    fn test_first_accepted_record_pins_state() {
        let mut stream = neutral_stream();
        assert_eq!(stream.state(), StreamState::AwaitingFirstFix);
        assert_eq!(stream.pinned_zone(), None);

        let pose = stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFixed))
            .unwrap();
        assert_eq!(pose.translation, contracts::Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(stream.state(), StreamState::Streaming { zone: 51 });
    }

    #[test]
    fn test_unresolved_fix_never_sets_origin() {
        let mut stream = neutral_stream();
        let err = stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFloat))
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnresolvedFix { .. }));
        assert_eq!(stream.state(), StreamState::AwaitingFirstFix);

        // The next fixed record becomes the origin instead
        let pose = stream
            .process(&record(1.0, 30.0001, 120.0, FixStatus::RtkFixed))
            .unwrap();
        assert_eq!(pose.translation, contracts::Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_float_policy_widens_acceptance() {
        let mut stream = GnssPoseStream::new(
            &AntennaConfig::default(),
            &ConversionConfig {
                quality: QualityPolicy::RtkFloat,
                ..Default::default()
            },
        );
        assert!(stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFloat))
            .is_ok());
        assert!(stream
            .process(&record(1.0, 30.0, 120.0, FixStatus::Autonomous))
            .is_err());
    }

    #[test]
    fn test_second_record_is_origin_relative() {
        let mut stream = neutral_stream();
        stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFixed))
            .unwrap();
        let pose = stream
            .process(&record(1.0, 30.0001, 120.0, FixStatus::RtkFixed))
            .unwrap();
        assert!(pose.translation.y > 10.0 && pose.translation.y < 12.0);
        assert!(pose.translation.x.abs() < 0.01);
    }

    #[test]
    fn test_zone_mismatch_detected_not_reprojected() {
        let mut stream = neutral_stream();
        stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFixed))
            .unwrap();

        // lon 114 lies in zone 50
        let err = stream
            .process(&record(1.0, 30.0, 114.0, FixStatus::RtkFixed))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::ZoneMismatch {
                record_zone: 50,
                pinned_zone: 51
            }
        );
        // The stream keeps going afterwards
        assert!(stream
            .process(&record(2.0, 30.0, 120.0, FixStatus::RtkFixed))
            .is_ok());
    }

    #[test]
    fn test_fixed_zone_config_applies_before_first_fix() {
        let mut stream = GnssPoseStream::new(
            &AntennaConfig::default(),
            &ConversionConfig {
                fixed_zone: Some(50),
                ..Default::default()
            },
        );
        let err = stream
            .process(&record(0.0, 30.0, 120.0, FixStatus::RtkFixed))
            .unwrap_err();
        assert!(matches!(err, ConvertError::ZoneMismatch { .. }));
    }

    #[test]
    fn test_invalid_coordinate_dropped() {
        let mut stream = neutral_stream();
        let err = stream
            .process(&record(0.0, f64::NAN, 120.0, FixStatus::RtkFixed))
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidCoordinate { .. }));
        assert_eq!(stream.state(), StreamState::AwaitingFirstFix);
    }

    #[test]
    fn test_replay_is_bit_identical() {
        let records = [
            record(0.0, 30.0, 120.0, FixStatus::RtkFixed),
            record(1.0, 30.0001, 120.00005, FixStatus::RtkFixed),
            record(2.0, 30.0002, 120.0001, FixStatus::RtkFixed),
        ];

        let run = |records: &[GnssRecord]| -> Vec<StampedPose> {
            let mut stream = neutral_stream();
            records
                .iter()
                .filter_map(|r| stream.process(r).ok())
                .collect()
        };

        let a = run(&records);
        let b = run(&records);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.translation.x.to_bits(), pb.translation.x.to_bits());
            assert_eq!(pa.translation.y.to_bits(), pb.translation.y.to_bits());
            assert_eq!(pa.rotation.w.to_bits(), pb.rotation.w.to_bits());
        }
    }
}
