//! Entry generators, one per report section.
//!
//! Each pass walks its rows in sheet order and emits at most one entry per
//! row. Rows that cannot be posted are skipped, never reported as errors:
//! a messy report still yields a best-effort journal.

use std::fmt;

use tracing::{debug, warn};

use super::entry::{EntryType, JournalEntry, PostingAmount, PostingHeader};
use crate::accounts::{AccountResolver, LabelDetail};
use crate::normalize::format_percent;
use crate::source::{DisbursementRow, DrawerRow, FamilyRow, VatRow};

/// Subtotal and total lines contain this token once normalized.
pub const TOTAL_MARKER: &str = "TOTAL";

/// Tax-exempt VAT lines contain this token once normalized.
pub const EXEMPT_MARKER: &str = "EXONERE";

/// The four generator passes, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    /// Net sales per family, credited.
    FamilySales,
    /// VAT collected per rate, credited.
    VatCollected,
    /// Drawer receipts per payment method, debited.
    DrawerReceipts,
    /// Miscellaneous disbursements, debited.
    Disbursements,
}

impl Generator {
    /// All passes, in output order.
    pub const ALL: [Self; 4] = [
        Self::FamilySales,
        Self::VatCollected,
        Self::DrawerReceipts,
        Self::Disbursements,
    ];
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FamilySales => write!(f, "family_sales"),
            Self::VatCollected => write!(f, "vat_collected"),
            Self::DrawerReceipts => write!(f, "drawer_receipts"),
            Self::Disbursements => write!(f, "disbursements"),
        }
    }
}

fn is_total(key: &str) -> bool {
    key.contains(TOTAL_MARKER)
}

/// Credits net sales to each family's revenue account.
#[must_use]
pub fn family_sales(
    rows: &[FamilyRow],
    resolver: &AccountResolver<'_>,
    header: &PostingHeader,
    labels: LabelDetail,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if row.key.is_empty() || is_total(&row.key) {
            debug!(index, family = %row.family, "skipping blank or total family row");
            continue;
        }
        let Some(amount) = PostingAmount::new(row.amount) else {
            debug!(index, family = %row.family, amount = %row.amount, "skipping non-positive family sales");
            continue;
        };

        entries.push(JournalEntry::new(
            header,
            resolver.family(&row.key).clone(),
            header.label_with(&row.family, labels.family),
            EntryType::Credit,
            amount,
        ));
    }

    entries
}

/// Credits collected VAT to the account of its rate.
///
/// Tax-exempt lines, lines without a readable rate and rates with no account
/// are skipped.
#[must_use]
pub fn vat_collected(
    rows: &[VatRow],
    resolver: &AccountResolver<'_>,
    header: &PostingHeader,
    labels: LabelDetail,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if row.label.contains(EXEMPT_MARKER) || is_total(&row.label) {
            debug!(index, label = %row.label, "skipping exempt or total VAT row");
            continue;
        }
        let Some(amount) = PostingAmount::new(row.amount) else {
            debug!(index, label = %row.label, amount = %row.amount, "skipping non-positive VAT");
            continue;
        };
        let Some(rate) = row.rate else {
            debug!(index, label = %row.label, "skipping VAT row without a readable rate");
            continue;
        };
        let Some(account) = resolver.vat(rate) else {
            warn!(index, %rate, amount = %row.amount, "no account for VAT rate, row skipped");
            continue;
        };

        let detail = format!("TVA {}%", format_percent(rate));
        entries.push(JournalEntry::new(
            header,
            account.clone(),
            header.label_with(&detail, labels.vat),
            EntryType::Credit,
            amount,
        ));
    }

    entries
}

/// Debits drawer receipts to the account of their payment method.
#[must_use]
pub fn drawer_receipts(
    rows: &[DrawerRow],
    resolver: &AccountResolver<'_>,
    header: &PostingHeader,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if row.method.is_empty() || is_total(&row.method) {
            debug!(index, method = %row.method, "skipping blank or total drawer row");
            continue;
        }
        let Some(amount) = PostingAmount::new(row.amount) else {
            debug!(index, method = %row.method, amount = %row.amount, "skipping non-positive receipt");
            continue;
        };

        let (method, account) = resolver.payment(&row.method);
        if method.is_none() {
            debug!(index, label = %row.method, %account, "unknown payment method, using receivable account");
        }

        entries.push(JournalEntry::new(
            header,
            account.clone(),
            header.label.clone(),
            EntryType::Debit,
            amount,
        ));
    }

    entries
}

/// Debits every disbursement to the client's disbursement account.
///
/// Amounts are signed in the report; any nonzero amount posts its absolute
/// value.
#[must_use]
pub fn disbursements(
    rows: &[DisbursementRow],
    resolver: &AccountResolver<'_>,
    header: &PostingHeader,
    labels: LabelDetail,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(rows.len());
    let account = resolver.disbursement();

    for (index, row) in rows.iter().enumerate() {
        if row.key.is_empty() || is_total(&row.key) {
            debug!(index, description = %row.description, "skipping blank or total disbursement row");
            continue;
        }
        let Some(amount) = PostingAmount::new(row.amount.abs()) else {
            debug!(index, description = %row.description, "skipping zero disbursement");
            continue;
        };

        entries.push(JournalEntry::new(
            header,
            account.clone(),
            header.label_with(&row.description, labels.disbursement),
            EntryType::Debit,
            amount,
        ));
    }

    entries
}
