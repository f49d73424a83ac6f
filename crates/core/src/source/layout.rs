//! Fixed layout of the four report sections.

use std::fmt;

use salesjournal_shared::config::SheetNames;

use super::cell::Cell;
use crate::normalize::normalize_label;

/// The four sections of a sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Net sales per product family.
    Families,
    /// VAT collected per rate.
    Vat,
    /// Cash drawer receipts per payment method.
    Drawer,
    /// Miscellaneous disbursements.
    Disbursements,
}

/// A named column with the position used when the name is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header text, compared after trimming.
    pub name: &'static str,
    /// Zero-based column used when no header matches `name`.
    pub fallback: usize,
}

const fn column(name: &'static str, fallback: usize) -> ColumnSpec {
    ColumnSpec { name, fallback }
}

const FAMILY_COLUMNS: [ColumnSpec; 2] = [column("FAMILLE", 0), column("CA HT", 1)];
const VAT_COLUMNS: [ColumnSpec; 3] = [
    column("LIBELLE TVA", 0),
    column("Taux", 1),
    column("TVA", 2),
];
const DRAWER_COLUMNS: [ColumnSpec; 2] = [column("Paiement", 0), column("Montant en euro", 1)];
const DISBURSEMENT_COLUMNS: [ColumnSpec; 2] =
    [column("Libellé", 0), column("Montant en euro", 1)];

impl Section {
    /// Zero-based index of the header row.
    #[must_use]
    pub const fn header_row(self) -> usize {
        match self {
            Self::Families | Self::Vat | Self::Drawer => 2,
            Self::Disbursements => 6,
        }
    }

    /// Columns read from the section, in record field order.
    #[must_use]
    pub const fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::Families => &FAMILY_COLUMNS,
            Self::Vat => &VAT_COLUMNS,
            Self::Drawer => &DRAWER_COLUMNS,
            Self::Disbursements => &DISBURSEMENT_COLUMNS,
        }
    }

    /// Configured sheet name for the section.
    #[must_use]
    pub fn sheet_name(self, names: &SheetNames) -> &str {
        match self {
            Self::Families => &names.families,
            Self::Vat => &names.vat,
            Self::Drawer => &names.drawer,
            Self::Disbursements => &names.disbursements,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Families => write!(f, "families"),
            Self::Vat => write!(f, "vat"),
            Self::Drawer => write!(f, "drawer"),
            Self::Disbursements => write!(f, "disbursements"),
        }
    }
}

/// Resolves each column spec to a zero-based index in the header row.
///
/// A trimmed exact match wins, then a match on normalized labels (case and
/// accents ignored), then the column's positional fallback.
#[must_use]
pub fn resolve_columns(header: &[Cell], specs: &[ColumnSpec]) -> Vec<usize> {
    let trimmed: Vec<String> = header.iter().map(Cell::as_text).collect();

    specs
        .iter()
        .map(|spec| {
            trimmed
                .iter()
                .position(|h| h == spec.name)
                .or_else(|| {
                    let wanted = normalize_label(spec.name);
                    trimmed.iter().position(|h| normalize_label(h) == wanted)
                })
                .unwrap_or(spec.fallback)
        })
        .collect()
}
