//! RecordSource trait - Record source abstraction
//!
//! Defines a unified interface for GNSS record sources, decoupling the
//! pipeline from the concrete log format. Supports unified handling of real
//! receiver logs and in-memory mock sources.

use crate::{GnssRecord, PipelineError};

/// Lazy, finite, single-pass sequence of raw GNSS records
///
/// The pipeline pulls records one at a time; a source must never buffer or
/// reorder. `Ok(None)` signals end-of-source and is terminal: further calls
/// keep returning `Ok(None)`.
///
/// # Example
///
/// ```ignore
/// let mut source = TxtRecordSource::open("data/gnss.txt")?;
/// while let Some(record) = source.next_record()? {
///     process(record);
/// }
/// ```
pub trait RecordSource {
    /// Pull the next record
    ///
    /// # Errors
    /// Returns an error only for unrecoverable read failures; malformed
    /// individual records are a source-internal concern (skip and count).
    fn next_record(&mut self) -> Result<Option<GnssRecord>, PipelineError>;
}
