//! Run inputs and outputs.

use chrono::NaiveDate;
use uuid::Uuid;

use super::balance::BalanceCheck;
use super::entry::{JournalEntry, PostingHeader};
use super::generators::Generator;
use crate::accounts::AccountMapping;
use crate::period::Period;

/// Per-run posting choices made by the bookkeeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingOptions {
    /// Journal code written on every line.
    pub journal_code: String,
    /// Prefix of the generated label (`"{prefix} MM-YYYY"`).
    pub label_prefix: String,
    /// Replaces the generated label entirely.
    pub label: Option<String>,
    /// Replaces the period-end posting date.
    pub date: Option<NaiveDate>,
}

impl Default for PostingOptions {
    fn default() -> Self {
        Self {
            journal_code: "VE".to_string(),
            label_prefix: "CA".to_string(),
            label: None,
            date: None,
        }
    }
}

/// Everything one run needs besides the report itself.
///
/// Built per request and passed explicitly; nothing is kept between runs.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Correlation id for log records.
    pub run_id: Uuid,
    /// The bookkeeper running the conversion.
    pub operator: String,
    /// The client whose report is converted.
    pub client: String,
    /// The client's account mapping.
    pub mapping: AccountMapping,
    /// Posting choices for this run.
    pub options: PostingOptions,
}

impl RunContext {
    /// Creates a context with a fresh run id.
    pub fn new(
        operator: impl Into<String>,
        client: impl Into<String>,
        mapping: AccountMapping,
        options: PostingOptions,
    ) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            operator: operator.into(),
            client: client.into(),
            mapping,
            options,
        }
    }
}

/// The ordered entries of one run: generator order, then sheet row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSet {
    entries: Vec<JournalEntry>,
}

impl JournalSet {
    /// Appends a generator pass.
    pub(crate) fn extend(&mut self, entries: Vec<JournalEntry>) {
        self.entries.extend(entries);
    }

    /// The entries, in order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, JournalEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a JournalSet {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Entries produced by each generator pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Family sales lines.
    pub family_sales: usize,
    /// VAT lines.
    pub vat_collected: usize,
    /// Drawer lines.
    pub drawer_receipts: usize,
    /// Disbursement lines.
    pub disbursements: usize,
}

impl RunSummary {
    /// Records the count of one pass.
    pub(crate) fn record(&mut self, generator: Generator, count: usize) {
        match generator {
            Generator::FamilySales => self.family_sales = count,
            Generator::VatCollected => self.vat_collected = count,
            Generator::DrawerReceipts => self.drawer_receipts = count,
            Generator::Disbursements => self.disbursements = count,
        }
    }

    /// Total entries.
    #[must_use]
    pub fn total(&self) -> usize {
        self.family_sales + self.vat_collected + self.drawer_receipts + self.disbursements
    }
}

/// Result of one conversion.
#[derive(Debug, Clone)]
pub struct JournalRun {
    /// Reporting period the label refers to.
    pub period: Period,
    /// Date, code and label shared by all lines.
    pub header: PostingHeader,
    /// The generated entries.
    pub entries: JournalSet,
    /// Debit/credit reconciliation.
    pub balance: BalanceCheck,
    /// Per-generator entry counts.
    pub summary: RunSummary,
}
