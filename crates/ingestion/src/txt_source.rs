//! Receiver text log reader.
//!
//! The reference logs interleave several sensors, one line each, tagged by
//! the first token. Only `GNSS` lines are consumed here:
//!
//! ```text
//! GNSS <time> <lat> <lon> <alt> <heading> <status>
//! IMU  ...
//! ODOM ...
//! ```
//!
//! `status` is the GGA-style integer quality flag (4 fixed, 5 float).

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use contracts::{FixStatus, GnssRecord, PipelineError, RecordSource};
use metrics::counter;
use tracing::{debug, warn};

use crate::metrics::SourceMetrics;

const GNSS_TAG: &str = "GNSS";

/// Lazy single-pass reader over a receiver text log
pub struct TxtRecordSource {
    path: String,
    lines: Lines<BufReader<File>>,
    metrics: SourceMetrics,
    exhausted: bool,
}

impl TxtRecordSource {
    /// Open a log file
    ///
    /// # Errors
    /// Failing to open the file is fatal for the run; there is nothing to
    /// process without a source.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path_str = path.as_ref().display().to_string();
        let file = File::open(path.as_ref())
            .map_err(|e| PipelineError::source_open(&path_str, e.to_string()))?;

        debug!(path = %path_str, "record source opened");

        Ok(Self {
            path: path_str,
            lines: BufReader::new(file).lines(),
            metrics: SourceMetrics::new(),
            exhausted: false,
        })
    }

    /// Source-side counters
    pub fn metrics(&self) -> &SourceMetrics {
        &self.metrics
    }

    /// Parse one `GNSS` line into a record
    ///
    /// Returns `None` when the line belongs to another sensor or is
    /// malformed; the distinction is recorded in the metrics.
    fn parse_line(&self, line: &str) -> Option<GnssRecord> {
        let mut fields = line.split_whitespace();
        if fields.next() != Some(GNSS_TAG) {
            self.metrics.record_skipped();
            return None;
        }

        let parsed = (|| {
            let timestamp = fields.next()?.parse().ok()?;
            let latitude = fields.next()?.parse().ok()?;
            let longitude = fields.next()?.parse().ok()?;
            let altitude = fields.next()?.parse().ok()?;
            let heading = fields.next()?.parse().ok()?;
            let status = FixStatus::from_flag(fields.next()?.parse().ok()?);

            Some(GnssRecord {
                timestamp,
                latitude,
                longitude,
                altitude,
                heading,
                status,
            })
        })();

        if parsed.is_none() {
            self.metrics.record_parse_error();
            counter!("gnss_pose_source_parse_errors_total").increment(1);
            warn!(path = %self.path, line, "malformed GNSS line skipped");
        }
        parsed
    }
}

impl RecordSource for TxtRecordSource {
    fn next_record(&mut self) -> Result<Option<GnssRecord>, PipelineError> {
        if self.exhausted {
            return Ok(None);
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(record) = self.parse_line(&line) {
                        self.metrics.record_produced();
                        return Ok(Some(record));
                    }
                }
                Some(Err(e)) => {
                    self.exhausted = true;
                    return Err(PipelineError::source_read(e.to_string()));
                }
                None => {
                    self.exhausted = true;
                    let snapshot = self.metrics.snapshot();
                    debug!(
                        path = %self.path,
                        records = snapshot.records_produced,
                        skipped = snapshot.lines_skipped,
                        malformed = snapshot.parse_errors,
                        "record source exhausted"
                    );
                    return Ok(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_from(content: &str) -> TxtRecordSource {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        TxtRecordSource::open(file.into_temp_path().keep().unwrap()).unwrap()
    }

    fn drain(source: &mut TxtRecordSource) -> Vec<GnssRecord> {
        let mut records = Vec::new();
        while let Some(record) = source.next_record().unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_parses_gnss_lines_in_order() {
        let mut source = source_from(
            "GNSS 1.0 30.0 120.0 12.5 90.0 4\n\
             GNSS 2.0 30.0001 120.0 12.5 90.0 5\n",
        );
        let records = drain(&mut source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, 1.0);
        assert_eq!(records[0].status, FixStatus::RtkFixed);
        assert_eq!(records[1].status, FixStatus::RtkFloat);
        assert_eq!(source.metrics().snapshot().records_produced, 2);
    }

    #[test]
    fn test_foreign_tags_are_skipped() {
        let mut source = source_from(
            "IMU 1.0 0.0 0.0 9.8 0.0 0.0 0.0\n\
             GNSS 1.5 30.0 120.0 0.0 0.0 4\n\
             ODOM 1.6 0.1 0.1\n",
        );
        let records = drain(&mut source);
        assert_eq!(records.len(), 1);
        assert_eq!(source.metrics().snapshot().lines_skipped, 2);
    }

    #[test]
    fn test_malformed_gnss_line_counted_not_fatal() {
        let mut source = source_from(
            "GNSS 1.0 30.0 not-a-number 0.0 0.0 4\n\
             GNSS 2.0 30.0 120.0\n\
             GNSS 3.0 30.0 120.0 0.0 0.0 4\n",
        );
        let records = drain(&mut source);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 3.0);
        assert_eq!(source.metrics().snapshot().parse_errors, 2);
    }

    #[test]
    fn test_end_of_source_is_terminal() {
        let mut source = source_from("GNSS 1.0 30.0 120.0 0.0 0.0 4\n");
        drain(&mut source);
        assert!(source.next_record().unwrap().is_none());
        assert!(source.next_record().unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = TxtRecordSource::open("/nonexistent/gnss.txt");
        assert!(matches!(result, Err(PipelineError::SourceOpen { .. })));
    }
}
