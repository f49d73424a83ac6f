//! Journal generation.
//!
//! This module turns a [`SourceReport`](crate::source::SourceReport) into
//! posting lines:
//! - Journal entries (one side, positive amount)
//! - The four section generators
//! - Debit/credit reconciliation
//! - Run context and results
//! - Journal service orchestrating a run

pub mod balance;
pub mod entry;
pub mod generators;
pub mod service;
pub mod types;

#[cfg(test)]
mod generators_props;

pub use balance::BalanceCheck;
pub use entry::{EntryType, JournalEntry, PostingAmount, PostingHeader};
pub use generators::{EXEMPT_MARKER, Generator, TOTAL_MARKER};
pub use service::JournalService;
pub use types::{JournalRun, JournalSet, PostingOptions, RunContext, RunSummary};
