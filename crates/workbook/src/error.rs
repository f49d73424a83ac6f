//! Workbook reader errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a spreadsheet.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The input file does not exist.
    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be opened as a spreadsheet.
    #[error("Cannot open workbook {}: {source}", path.display())]
    Open {
        /// The input path.
        path: PathBuf,
        /// Reader failure.
        #[source]
        source: calamine::Error,
    },

    /// A sheet listed by the workbook could not be read.
    #[error("Cannot read sheet {sheet:?}: {source}")]
    Sheet {
        /// The sheet name.
        sheet: String,
        /// Reader failure.
        #[source]
        source: calamine::Error,
    },
}

impl WorkbookError {
    /// Returns a stable error code for log records.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "WORKBOOK_NOT_FOUND",
            Self::Open { .. } => "WORKBOOK_UNREADABLE",
            Self::Sheet { .. } => "SHEET_UNREADABLE",
        }
    }
}
