//! Export error types.

use thiserror::Error;

/// Errors that can occur while writing a journal.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serializer failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying writer failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimiter or decimal separator is unusable.
    #[error("Invalid export option: {0}")]
    InvalidOption(String),
}

impl ExportError {
    /// Returns a stable error code for log records.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Csv(_) => "CSV_WRITE_FAILED",
            Self::Json(_) => "JSON_WRITE_FAILED",
            Self::Io(_) => "EXPORT_IO_FAILED",
            Self::InvalidOption(_) => "INVALID_EXPORT_OPTION",
        }
    }
}
