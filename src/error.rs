//! Error types for the export engine

use thiserror::Error;

/// Errors surfaced by parsing and rendering.
///
/// Empty input is not an error: the pipeline reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output buffer could not be written to
    #[error("output buffer unavailable: {0}")]
    ResourceUnavailable(#[from] std::io::Error),

    /// The CSV reader or writer failed on a record
    #[error("CSV error at record {record}: {source}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },

    /// Input bytes were not valid UTF-8
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
