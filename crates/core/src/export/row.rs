//! Flat output row shared by the writers.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::journal::JournalEntry;

/// Posting dates are written day first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Column headers, in output order.
pub const HEADERS: [&str; 6] = [
    "DATE",
    "CODE JOURNAL",
    "NUMERO DE COMPTE",
    "LIBELLE",
    "DEBIT",
    "CREDIT",
];

/// One journal line as written to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow<'a> {
    /// Posting date, `DD/MM/YYYY`.
    #[serde(rename = "DATE")]
    pub date: String,
    /// Journal code.
    #[serde(rename = "CODE JOURNAL")]
    pub journal_code: &'a str,
    /// Ledger account.
    #[serde(rename = "NUMERO DE COMPTE")]
    pub account_number: &'a str,
    /// Line label.
    #[serde(rename = "LIBELLE")]
    pub label: &'a str,
    /// Debit column, two decimals.
    #[serde(rename = "DEBIT")]
    pub debit: String,
    /// Credit column, two decimals.
    #[serde(rename = "CREDIT")]
    pub credit: String,
}

impl<'a> ExportRow<'a> {
    /// Flattens an entry, formatting amounts with `decimal_separator`.
    #[must_use]
    pub fn from_entry(entry: &'a JournalEntry, decimal_separator: char) -> Self {
        Self {
            date: entry.date().format(DATE_FORMAT).to_string(),
            journal_code: entry.journal_code(),
            account_number: entry.account_number().as_str(),
            label: entry.label(),
            debit: format_amount(entry.debit(), decimal_separator),
            credit: format_amount(entry.credit(), decimal_separator),
        }
    }
}

/// Formats an amount with exactly two decimals, half away from zero.
#[must_use]
pub fn format_amount(amount: Decimal, decimal_separator: char) -> String {
    let text = format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    );
    if decimal_separator == '.' {
        text
    } else {
        text.replace('.', &decimal_separator.to_string())
    }
}
