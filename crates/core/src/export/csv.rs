//! Delimited text journal writer.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use super::ExportOptions;
use super::error::ExportError;
use super::row::{ExportRow, HEADERS};
use crate::journal::JournalSet;

/// Writes the journal as delimited text, header line first.
///
/// The header is written even for an empty journal.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(
    writer: W,
    entries: &JournalSet,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(HEADERS)?;
    for entry in entries {
        wtr.serialize(ExportRow::from_entry(entry, options.decimal_separator))?;
    }
    wtr.flush()?;
    Ok(())
}
