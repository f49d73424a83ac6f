//! JSON journal writer.

use std::io::Write;

use super::ExportOptions;
use super::error::ExportError;
use super::row::ExportRow;
use crate::journal::JournalSet;

/// Writes the journal as a pretty-printed JSON array of rows.
///
/// Rows carry the same columns and formatting as the delimited output.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_json<W: Write>(
    mut writer: W,
    entries: &JournalSet,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let rows: Vec<ExportRow<'_>> = entries
        .iter()
        .map(|entry| ExportRow::from_entry(entry, options.decimal_separator))
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
