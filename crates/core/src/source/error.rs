//! Source workbook layout errors.
//!
//! These are raised before any journal line is generated; once a report is
//! loaded, row-level anomalies are skipped instead.

use thiserror::Error;

use super::layout::Section;

/// Errors that can occur while reading a report's sections.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A required sheet is missing from the workbook.
    #[error("Sheet {sheet:?} for section {section} not found in workbook")]
    MissingSheet {
        /// The section that needed the sheet.
        section: Section,
        /// The configured sheet name.
        sheet: String,
    },

    /// A sheet has fewer rows than its header position.
    #[error("Sheet {sheet:?} has no header row at line {line}")]
    MissingHeader {
        /// The sheet name.
        sheet: String,
        /// One-based line where the header was expected.
        line: usize,
    },
}

impl SourceError {
    /// Returns a stable error code for log records.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSheet { .. } => "MISSING_SHEET",
            Self::MissingHeader { .. } => "MISSING_HEADER",
        }
    }
}
