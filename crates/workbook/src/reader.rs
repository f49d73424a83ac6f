//! Spreadsheet to [`RawWorkbook`] conversion.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, DataType, Range, Reader, Sheets};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use salesjournal_core::source::{Cell, RawSheet, RawWorkbook};
use tracing::{debug, info};

use crate::error::WorkbookError;

/// Float cells are rounded to this many places to drop binary noise.
const FLOAT_DECIMAL_PLACES: u32 = 9;

/// Reads every sheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods` file.
///
/// # Errors
///
/// Returns an error if the file is missing, is not a spreadsheet, or has an
/// unreadable sheet.
pub fn read_workbook(path: &Path) -> Result<RawWorkbook, WorkbookError> {
    if !path.is_file() {
        return Err(WorkbookError::NotFound(path.to_path_buf()));
    }

    let mut sheets = calamine::open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let workbook = convert_sheets(&mut sheets)?;

    info!(path = %path.display(), sheets = workbook.sheets.len(), "workbook loaded");
    Ok(workbook)
}

/// Reads a spreadsheet held in memory.
///
/// # Errors
///
/// Returns an error if the bytes are not a spreadsheet or a sheet is
/// unreadable.
pub fn read_workbook_bytes(bytes: Vec<u8>) -> Result<RawWorkbook, WorkbookError> {
    let mut sheets =
        calamine::open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| {
            WorkbookError::Open {
                path: "<memory>".into(),
                source,
            }
        })?;
    convert_sheets(&mut sheets)
}

fn convert_sheets<RS: Read + Seek>(sheets: &mut Sheets<RS>) -> Result<RawWorkbook, WorkbookError> {
    let names = sheets.sheet_names();
    let mut converted = Vec::with_capacity(names.len());

    for name in names {
        let range = sheets
            .worksheet_range(&name)
            .map_err(|source| WorkbookError::Sheet {
                sheet: name.clone(),
                source,
            })?;
        debug!(sheet = %name, size = ?range.get_size(), start = ?range.start(), "sheet read");
        converted.push(RawSheet::new(name, convert_range(&range)));
    }

    Ok(RawWorkbook::new(converted))
}

/// Converts a range to rows addressed from `A1`.
///
/// Ranges start at the first used cell, so leading rows and columns are
/// padded back with empty cells.
#[must_use]
pub fn convert_range(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    rows
}

/// Converts one spreadsheet value.
///
/// Floats become decimals; error cells read as empty.
#[must_use]
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f).map_or(Cell::Empty, |d| {
            Cell::Number(d.round_dp(FLOAT_DECIMAL_PLACES).normalize())
        }),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => data
            .as_date()
            .map_or_else(|| Cell::Text(data.to_string()), Cell::Date),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => {
            debug!(error = ?e, "error cell read as empty");
            Cell::Empty
        }
    }
}
