//! Sales report sources.
//!
//! A report is a workbook with four fixed sections. Readers hand over a
//! [`RawWorkbook`]; [`SourceReport::from_workbook`] validates the layout and
//! produces typed, normalized rows for the journal generators.

pub mod cell;
pub mod error;
pub mod layout;
pub mod report;

pub use cell::{Cell, RawSheet, RawWorkbook};
pub use error::SourceError;
pub use layout::{ColumnSpec, Section, resolve_columns};
pub use report::{DisbursementRow, DrawerRow, FamilyRow, SourceReport, VatRow};
