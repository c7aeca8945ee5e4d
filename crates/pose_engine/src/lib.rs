//! # Pose Engine
//!
//! GNSS-to-pose conversion core.
//!
//! Responsibilities:
//! - Geodetic → UTM projection (WGS84, transverse-Mercator series)
//! - Antenna lever-arm / mounting-angle compensation
//! - First-fix re-origining into a stable local tangent frame
//! - Per-record orchestration with quality filtering and zone pinning
//!
//! The whole conversion path is synchronous and deterministic: replaying the
//! same record sequence through a fresh [`GnssPoseStream`] reproduces
//! bit-identical output poses.
//!
//! ## Usage Example
//!
//! ```ignore
//! use pose_engine::GnssPoseStream;
//!
//! let mut stream = GnssPoseStream::new(&blueprint.antenna, &blueprint.conversion);
//! for record in records {
//!     match stream.process(&record) {
//!         Ok(pose) => emit(pose),
//!         Err(e) => tracing::warn!(reason = e.reason(), "record dropped"),
//!     }
//! }
//! ```

mod corrector;
mod projector;
mod stream;
mod tracker;

pub use corrector::{AntennaCorrector, CorrectedPose};
pub use projector::{check_coordinates, project, zone_for_longitude, ProjectedPoint};
pub use stream::{GnssPoseStream, StreamState};
pub use tracker::LocalFrameTracker;
