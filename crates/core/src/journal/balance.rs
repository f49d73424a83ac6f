//! Debit/credit reconciliation of a journal set.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::entry::JournalEntry;

/// Totals are compared at cent precision.
const BALANCE_DECIMAL_PLACES: u32 = 2;

/// Outcome of the balance check. Advisory: an imbalance never blocks export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceCheck {
    /// Sum of the debit column, rounded to cents.
    pub total_debit: Decimal,
    /// Sum of the credit column, rounded to cents.
    pub total_credit: Decimal,
    /// A column total exceeded the decimal range and was capped.
    pub overflowed: bool,
}

impl BalanceCheck {
    /// Sums debits and credits independently and rounds both to cents.
    ///
    /// A total that would overflow is capped at [`Decimal::MAX`] and the
    /// check is flagged as overflowed; it never reports balanced.
    #[must_use]
    pub fn verify(entries: &[JournalEntry]) -> Self {
        let total_debit = column_total(entries, JournalEntry::debit);
        let total_credit = column_total(entries, JournalEntry::credit);

        if total_debit.is_none() || total_credit.is_none() {
            warn!(entries = entries.len(), "journal totals exceed the decimal range");
        }

        Self {
            total_debit: total_debit
                .unwrap_or(Decimal::MAX)
                .round_dp(BALANCE_DECIMAL_PLACES),
            total_credit: total_credit
                .unwrap_or(Decimal::MAX)
                .round_dp(BALANCE_DECIMAL_PLACES),
            overflowed: total_debit.is_none() || total_credit.is_none(),
        }
    }

    /// Returns true when debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        !self.overflowed && self.total_debit == self.total_credit
    }

    /// Returns `debit - credit`.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit.saturating_sub(self.total_credit)
    }
}

/// Sums one column, `None` on overflow.
fn column_total(entries: &[JournalEntry], side: fn(&JournalEntry) -> Decimal) -> Option<Decimal> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |total, entry| total.checked_add(side(entry)))
}

impl fmt::Display for BalanceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overflowed {
            write!(f, "Entries cannot be balanced: totals exceed the decimal range")
        } else if self.is_balanced() {
            write!(
                f,
                "Entries are balanced (debit {:.2} = credit {:.2})",
                self.total_debit, self.total_credit
            )
        } else {
            write!(
                f,
                "Entries are NOT balanced: debit {:.2}, credit {:.2}, difference {:.2}",
                self.total_debit,
                self.total_credit,
                self.difference()
            )
        }
    }
}
