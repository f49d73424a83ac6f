//! Journal export.
//!
//! Entries are written in order with the columns `DATE`, `CODE JOURNAL`,
//! `NUMERO DE COMPTE`, `LIBELLE`, `DEBIT`, `CREDIT`. Output is
//! byte-deterministic for a given journal and options.

pub mod csv;
pub mod error;
pub mod json;
pub mod row;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use salesjournal_shared::config::ExportConfig;

pub use self::csv::write_csv;
pub use error::ExportError;
pub use json::write_json;
pub use row::{DATE_FORMAT, ExportRow, HEADERS, format_amount};

use crate::journal::JournalSet;

/// Output formatting choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter of the delimited output.
    pub delimiter: u8,
    /// Decimal separator of amounts.
    pub decimal_separator: char,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_separator: ',',
        }
    }
}

impl ExportOptions {
    /// Builds options from the `[export]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter or the separator is not a single
    /// character.
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        let delimiter = config
            .delimiter_byte()
            .map_err(|e| ExportError::InvalidOption(e.to_string()))?;
        let decimal_separator = config
            .decimal_char()
            .map_err(|e| ExportError::InvalidOption(e.to_string()))?;

        Ok(Self {
            delimiter,
            decimal_separator,
        })
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Delimited text.
    #[default]
    Csv,
    /// JSON array of rows.
    Json,
}

impl ExportFormat {
    /// Writes `entries` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(
        self,
        writer: W,
        entries: &JournalSet,
        options: &ExportOptions,
    ) -> Result<(), ExportError> {
        match self {
            Self::Csv => write_csv(writer, entries, options),
            Self::Json => write_json(writer, entries, options),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::InvalidOption(format!("unknown format: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(delimiter: &str, decimal_separator: &str) -> ExportConfig {
        ExportConfig {
            delimiter: delimiter.to_string(),
            decimal_separator: decimal_separator.to_string(),
        }
    }

    #[test]
    fn test_options_from_default_config() {
        let options = ExportOptions::from_config(&ExportConfig::default()).unwrap();
        assert_eq!(options, ExportOptions::default());
    }

    #[test]
    fn test_options_reject_multichar_delimiter() {
        let err = ExportOptions::from_config(&config("::", ",")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_EXPORT_OPTION");
    }

    #[test]
    fn test_options_reject_empty_separator() {
        assert!(ExportOptions::from_config(&config(";", "")).is_err());
    }

    #[test]
    fn test_options_from_custom_config() {
        let options = ExportOptions::from_config(&config("\t", ".")).unwrap();
        assert_eq!(options.delimiter, b'\t');
        assert_eq!(options.decimal_separator, '.');
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
