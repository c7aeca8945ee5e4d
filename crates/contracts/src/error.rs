//! Layered error definitions
//!
//! Categorized by source: config / source / conversion / sink / viz

use thiserror::Error;

use crate::FixStatus;

/// Record-local conversion failure
///
/// Every kind is non-fatal: the offending record is dropped with a
/// diagnostic and the stream continues.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvertError {
    /// Latitude/longitude out of the projectable range, or NaN
    #[error("invalid coordinate: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Quality flag below the acceptance policy
    #[error("unresolved fix: {status:?}")]
    UnresolvedFix { status: FixStatus },

    /// Record longitude implies a UTM zone other than the run's pinned zone
    #[error("utm zone mismatch: record zone {record_zone}, pinned zone {pinned_zone}")]
    ZoneMismatch { record_zone: u8, pinned_zone: u8 },
}

impl ConvertError {
    /// Stable label for drop counters and diagnostics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate { .. } => "invalid_coordinate",
            Self::UnresolvedFix { .. } => "unresolved_fix",
            Self::ZoneMismatch { .. } => "zone_mismatch",
        }
    }
}

/// Unified error type for the fatal rim of the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Record Source Errors =====
    /// Source could not be opened (fatal at startup)
    #[error("cannot open record source '{path}': {message}")]
    SourceOpen { path: String, message: String },

    /// Unrecoverable read failure mid-stream
    #[error("record source read error: {message}")]
    SourceRead { message: String },

    // ===== Conversion Errors =====
    /// Record-local conversion failure (never fatal)
    #[error(transparent)]
    Convert(#[from] ConvertError),

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Sink connection error
    #[error("sink '{sink_name}' connection error: {message}")]
    SinkConnection { sink_name: String, message: String },

    // ===== Visualization Errors =====
    /// Visualization bridge error
    #[error("viz error: {message}")]
    Viz { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source open error
    pub fn source_open(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create source read error
    pub fn source_read(message: impl Into<String>) -> Self {
        Self::SourceRead {
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create viz error
    pub fn viz(message: impl Into<String>) -> Self {
        Self::Viz {
            message: message.into(),
        }
    }
}
