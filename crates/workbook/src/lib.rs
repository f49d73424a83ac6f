//! Spreadsheet adapter for Salesjournal.
//!
//! Reads report workbooks with `calamine` and hands them to the engine as a
//! [`RawWorkbook`](salesjournal_core::source::RawWorkbook). Every sheet is
//! converted; picking sections is the engine's job.

pub mod error;
pub mod reader;

pub use error::WorkbookError;
pub use reader::{convert_cell, convert_range, read_workbook, read_workbook_bytes};
