//! Typed section records built from a raw workbook.

use rust_decimal::Decimal;
use salesjournal_shared::config::SourceConfig;
use tracing::debug;

use super::cell::{Cell, RawSheet, RawWorkbook};
use super::error::SourceError;
use super::layout::{Section, resolve_columns};
use crate::normalize::normalize_label;

/// Net sales for one product family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRow {
    /// Family name as written in the report (trimmed).
    pub family: String,
    /// Normalized family name used for account lookup.
    pub key: String,
    /// Net-of-tax sales amount.
    pub amount: Decimal,
}

impl FamilyRow {
    /// Creates a row, normalizing the family name.
    pub fn new(family: impl Into<String>, amount: Decimal) -> Self {
        let family = family.into().trim().to_string();
        let key = normalize_label(&family);
        Self { family, key, amount }
    }
}

/// VAT collected at one rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatRow {
    /// Normalized VAT line label.
    pub label: String,
    /// Rate fraction, `None` when the rate cell could not be read.
    pub rate: Option<Decimal>,
    /// VAT amount.
    pub amount: Decimal,
}

impl VatRow {
    /// Creates a row, normalizing the label.
    #[must_use]
    pub fn new(label: &str, rate: Option<Decimal>, amount: Decimal) -> Self {
        Self {
            label: normalize_label(label),
            rate,
            amount,
        }
    }
}

/// Receipts for one payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerRow {
    /// Normalized payment-method label.
    pub method: String,
    /// Receipt amount.
    pub amount: Decimal,
}

impl DrawerRow {
    /// Creates a row, normalizing the payment-method label.
    #[must_use]
    pub fn new(method: &str, amount: Decimal) -> Self {
        Self {
            method: normalize_label(method),
            amount,
        }
    }
}

/// One miscellaneous disbursement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisbursementRow {
    /// Description as written in the report (trimmed).
    pub description: String,
    /// Normalized description used for total detection.
    pub key: String,
    /// Signed disbursement amount.
    pub amount: Decimal,
}

impl DisbursementRow {
    /// Creates a row, normalizing the description.
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        let description = description.into().trim().to_string();
        let key = normalize_label(&description);
        Self {
            description,
            key,
            amount,
        }
    }
}

/// A sales report split into its four typed sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    /// Content of the period cell on the family-sales sheet.
    pub period_hint: Cell,
    /// Family sales rows, in sheet order.
    pub families: Vec<FamilyRow>,
    /// VAT rows, in sheet order.
    pub vat: Vec<VatRow>,
    /// Cash drawer rows, in sheet order.
    pub drawer: Vec<DrawerRow>,
    /// Disbursement rows, in sheet order.
    pub disbursements: Vec<DisbursementRow>,
}

impl SourceReport {
    /// Reads the four sections out of a workbook.
    ///
    /// Column positions are resolved once per section from its header row.
    /// Rows whose selected cells are all blank are dropped; every other row
    /// is kept for the generators to judge.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if a sheet is missing or shorter than its header.
    pub fn from_workbook(
        workbook: &RawWorkbook,
        config: &SourceConfig,
    ) -> Result<Self, SourceError> {
        let families_sheet = sheet_for(workbook, config, Section::Families)?;
        let (row, column) = config.period_cell.indices();
        let period_hint = families_sheet.cell(row, column).clone();

        let families = section_rows(families_sheet, Section::Families)?
            .into_iter()
            .map(|cells| FamilyRow::new(cells[0].as_text(), cells[1].amount()))
            .collect();

        let vat = section_rows(sheet_for(workbook, config, Section::Vat)?, Section::Vat)?
            .into_iter()
            .map(|cells| VatRow {
                label: cells[0].label(),
                rate: cells[1].rate(),
                amount: cells[2].amount(),
            })
            .collect();

        let drawer = section_rows(sheet_for(workbook, config, Section::Drawer)?, Section::Drawer)?
            .into_iter()
            .map(|cells| DrawerRow {
                method: cells[0].label(),
                amount: cells[1].amount(),
            })
            .collect();

        let disbursements = section_rows(
            sheet_for(workbook, config, Section::Disbursements)?,
            Section::Disbursements,
        )?
        .into_iter()
        .map(|cells| DisbursementRow::new(cells[0].as_text(), cells[1].amount()))
        .collect();

        Ok(Self {
            period_hint,
            families,
            vat,
            drawer,
            disbursements,
        })
    }
}

fn sheet_for<'a>(
    workbook: &'a RawWorkbook,
    config: &SourceConfig,
    section: Section,
) -> Result<&'a RawSheet, SourceError> {
    let name = section.sheet_name(&config.sheets);
    workbook.sheet(name).ok_or_else(|| SourceError::MissingSheet {
        section,
        sheet: name.to_string(),
    })
}

/// Returns the section's data rows as cells in column-spec order.
fn section_rows(sheet: &RawSheet, section: Section) -> Result<Vec<Vec<&Cell>>, SourceError> {
    let header_row = section.header_row();
    let header = sheet
        .rows
        .get(header_row)
        .ok_or_else(|| SourceError::MissingHeader {
            sheet: sheet.name.clone(),
            line: header_row + 1,
        })?;

    let columns = resolve_columns(header, section.columns());
    debug!(%section, sheet = %sheet.name, ?columns, "resolved section columns");

    let rows = (header_row + 1..sheet.rows.len())
        .map(|row| {
            columns
                .iter()
                .map(|&column| sheet.cell(row, column))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.iter().all(|cell| cell.is_blank()))
        .collect();

    Ok(rows)
}
