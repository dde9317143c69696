//! Error types for the untab library.

use std::io;
use thiserror::Error;

/// Result type alias for untab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a recognizable Office Open XML container.
    #[error("Unknown file format: not a valid .docx container")]
    UnknownFormat,

    /// The container opened but its structure could not be read.
    #[error("Document parsing error: {0}")]
    DocxParse(String),

    /// No records could be extracted from the document's tables.
    #[error("No table data extracted from the document")]
    EmptyInput,

    /// The exporter was invoked with zero records.
    #[error("Nothing to export: record set is empty")]
    NoRecords,

    /// Error writing CSV output.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Error writing JSON output.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error finalizing an output buffer.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(err.to_string())
    }
}
