//! # Ingestion
//!
//! GNSS record ingestion module.
//!
//! Responsibilities:
//! - Open receiver text logs and parse them into `GnssRecord`s
//! - Skip foreign sensor lines and count malformed ones
//! - Provide a vec-backed mock source for tests and demos
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::TxtRecordSource;
//! use contracts::RecordSource;
//!
//! let mut source = TxtRecordSource::open("data/10.txt")?;
//! while let Some(record) = source.next_record()? {
//!     // Process record
//! }
//! println!("{} malformed lines", source.metrics().snapshot().parse_errors);
//! ```

mod metrics;
mod mock;
mod txt_source;

// Re-exports
pub use contracts::{GnssRecord, RecordSource};
pub use metrics::{MetricsSnapshot, SourceMetrics};
pub use mock::MockRecordSource;
pub use txt_source::TxtRecordSource;
