//! Account mapping validation errors.

use thiserror::Error;

/// Errors raised while loading a client's account mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// Account numbers are non-empty strings of ASCII digits.
    #[error("Invalid account number {0:?}: expected digits only")]
    InvalidAccountNumber(String),

    /// A VAT table key is not a rate.
    #[error("Invalid VAT rate key {0:?}")]
    InvalidRate(String),

    /// Two family names collapse to the same normalized key.
    #[error("Family {0:?} is mapped more than once")]
    DuplicateFamily(String),

    /// Two VAT keys denote the same rate.
    #[error("VAT rate {0} is mapped more than once")]
    DuplicateRate(String),

    /// A family name is blank.
    #[error("Family names must not be blank")]
    BlankFamily,
}

impl MappingError {
    /// Returns a stable error code for log records.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAccountNumber(_) => "INVALID_ACCOUNT_NUMBER",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::DuplicateFamily(_) => "DUPLICATE_FAMILY",
            Self::DuplicateRate(_) => "DUPLICATE_RATE",
            Self::BlankFamily => "BLANK_FAMILY",
        }
    }
}
