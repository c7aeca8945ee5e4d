//! Vec-backed mock record source for tests and demos.

use contracts::{FixStatus, GnssRecord, PipelineError, RecordSource};

/// In-memory record source
///
/// Yields a fixed sequence of records in order, then signals end-of-source.
/// Useful anywhere the pipeline needs exercising without a receiver log.
#[derive(Debug, Default)]
pub struct MockRecordSource {
    records: std::vec::IntoIter<GnssRecord>,
}

impl MockRecordSource {
    /// Create a source over a fixed record sequence
    pub fn new(records: Vec<GnssRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }

    /// A short straight north-bound track of fixed-quality records
    ///
    /// Starts at (30°N, 120°E) and steps 0.0001° of latitude per second.
    pub fn straight_track(count: usize) -> Self {
        let records = (0..count)
            .map(|i| GnssRecord {
                timestamp: i as f64,
                latitude: 30.0 + i as f64 * 1e-4,
                longitude: 120.0,
                altitude: 10.0,
                heading: 0.0,
                status: FixStatus::RtkFixed,
            })
            .collect();
        Self::new(records)
    }
}

impl RecordSource for MockRecordSource {
    fn next_record(&mut self) -> Result<Option<GnssRecord>, PipelineError> {
        Ok(self.records.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_in_order_then_ends() {
        let mut source = MockRecordSource::straight_track(3);
        let mut timestamps = Vec::new();
        while let Some(record) = source.next_record().unwrap() {
            timestamps.push(record.timestamp);
        }
        assert_eq!(timestamps, vec![0.0, 1.0, 2.0]);
        assert!(source.next_record().unwrap().is_none());
    }

    #[test]
    fn test_empty_source() {
        let mut source = MockRecordSource::new(Vec::new());
        assert!(source.next_record().unwrap().is_none());
    }
}
