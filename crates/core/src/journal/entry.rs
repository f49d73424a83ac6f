//! Journal entry domain types.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountNumber;

/// Type of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (drawer receipts, disbursements).
    Debit,
    /// Credit entry (sales, VAT collected).
    Credit,
}

/// Posted amounts are kept in cents.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// A strictly positive posting amount, rounded to cents.
///
/// Rounding happens once, here, so the balance check and the writers see
/// the same figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostingAmount(Decimal);

impl PostingAmount {
    /// Rounds `amount` to cents, half away from zero.
    ///
    /// Returns `None` unless the rounded amount is strictly positive.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        let rounded = amount
            .round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        (rounded > Decimal::ZERO).then_some(Self(rounded))
    }

    /// The amount.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

/// One posting line of the journal.
///
/// Exactly one of [`debit`](Self::debit) and [`credit`](Self::credit) is
/// nonzero: the side is fixed at construction and the amount is positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    date: NaiveDate,
    journal_code: String,
    account_number: AccountNumber,
    label: String,
    entry_type: EntryType,
    amount: PostingAmount,
}

impl JournalEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(
        header: &PostingHeader,
        account_number: AccountNumber,
        label: String,
        entry_type: EntryType,
        amount: PostingAmount,
    ) -> Self {
        Self {
            date: header.date,
            journal_code: header.journal_code.clone(),
            account_number,
            label,
            entry_type,
            amount,
        }
    }

    /// Posting date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Journal code.
    #[must_use]
    pub fn journal_code(&self) -> &str {
        &self.journal_code
    }

    /// Ledger account.
    #[must_use]
    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Line label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this is a debit or credit.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// The positive amount on the entry's side.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    /// Debit column value (zero for credits).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount.value(),
            EntryType::Credit => Decimal::ZERO,
        }
    }

    /// Credit column value (zero for debits).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => Decimal::ZERO,
            EntryType::Credit => self.amount.value(),
        }
    }
}

/// Values shared by every line of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingHeader {
    /// Posting date.
    pub date: NaiveDate,
    /// Journal code.
    pub journal_code: String,
    /// Base posting label, e.g. `"CA 09-2024"`.
    pub label: String,
}

impl PostingHeader {
    /// The base label, or `"{label} - {detail}"` when `with_detail` is set.
    #[must_use]
    pub fn label_with(&self, detail: &str, with_detail: bool) -> String {
        if with_detail && !detail.is_empty() {
            format!("{} - {detail}", self.label)
        } else {
            self.label.clone()
        }
    }
}
