//! Raw workbook model handed over by spreadsheet readers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_label, normalize_rate, parse_amount, parse_rate};

/// A single spreadsheet cell.
///
/// Readers convert floating-point cells to `Decimal` once, at the boundary;
/// the engine never sees a float.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// Free text, as typed.
    Text(String),
    /// Numeric value.
    Number(Decimal),
    /// Date or date-time value (time of day dropped).
    Date(NaiveDate),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true if the cell holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Date(_) | Self::Bool(_) => false,
        }
    }

    /// Returns the cell as trimmed display text (empty for blank cells).
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.normalize().to_string(),
            Self::Date(d) => d.format("%d/%m/%Y").to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Returns the normalized category label of the cell.
    #[must_use]
    pub fn label(&self) -> String {
        normalize_label(&self.as_text())
    }

    /// Returns the cell as a monetary amount, zero when absent or invalid.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => parse_amount(s),
            Self::Empty | Self::Date(_) | Self::Bool(_) => Decimal::ZERO,
        }
    }

    /// Returns the cell as a rate fraction, `None` when absent or invalid.
    #[must_use]
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(normalize_rate(*n)),
            Self::Text(s) => parse_rate(s),
            Self::Empty | Self::Date(_) | Self::Bool(_) => None,
        }
    }
}

/// One worksheet as a grid of cells, addressed from `A1`.
///
/// Rows may be ragged; missing cells read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    /// Sheet name as stored in the workbook.
    pub name: String,
    /// Rows from the first sheet row downwards.
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    /// Creates a sheet from its rows.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the cell at zero-based `(row, column)`, or `Empty` if outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

/// A workbook as a list of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawWorkbook {
    /// Sheets in workbook order.
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    /// Creates a workbook from its sheets.
    #[must_use]
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self { sheets }
    }

    /// Finds a sheet by name.
    ///
    /// An exact match wins; otherwise names are compared trimmed and
    /// case-insensitively, since report exports are not consistent about it.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|s| s.name == name).or_else(|| {
            let wanted = name.trim().to_lowercase();
            self.sheets
                .iter()
                .find(|s| s.name.trim().to_lowercase() == wanted)
        })
    }
}
