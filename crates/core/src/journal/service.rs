//! Journal service: report in, balanced journal out.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::balance::BalanceCheck;
use super::entry::PostingHeader;
use super::generators::{self, Generator};
use super::types::{JournalRun, JournalSet, PostingOptions, RunContext, RunSummary};
use crate::accounts::AccountResolver;
use crate::period::{Period, resolve_period};
use crate::source::SourceReport;

/// Journal service for converting sales reports.
///
/// This service contains pure transformation logic with no I/O. A run is
/// deterministic: the same context, report and `today` give the same entries.
pub struct JournalService;

impl JournalService {
    /// Converts a report into a journal.
    ///
    /// 1. Resolves the period (report cell, else `today`)
    /// 2. Builds the posting header (date override, label override)
    /// 3. Runs the four generators in order and concatenates their entries
    /// 4. Verifies the balance (advisory only)
    #[must_use]
    pub fn run(ctx: &RunContext, report: &SourceReport, today: NaiveDate) -> JournalRun {
        let report_period = resolve_period(&report.period_hint, today);
        let (period, header) = Self::posting_header(&ctx.options, report_period);

        let resolver = AccountResolver::new(&ctx.mapping);
        let labels = ctx.mapping.labels();

        let mut entries = JournalSet::default();
        let mut summary = RunSummary::default();

        for generator in Generator::ALL {
            let pass = match generator {
                Generator::FamilySales => {
                    generators::family_sales(&report.families, &resolver, &header, labels)
                }
                Generator::VatCollected => {
                    generators::vat_collected(&report.vat, &resolver, &header, labels)
                }
                Generator::DrawerReceipts => {
                    generators::drawer_receipts(&report.drawer, &resolver, &header)
                }
                Generator::Disbursements => {
                    generators::disbursements(&report.disbursements, &resolver, &header, labels)
                }
            };
            debug!(run_id = %ctx.run_id, %generator, entries = pass.len(), "generator pass done");
            summary.record(generator, pass.len());
            entries.extend(pass);
        }

        let balance = BalanceCheck::verify(entries.entries());

        info!(
            run_id = %ctx.run_id,
            operator = %ctx.operator,
            client = %ctx.client,
            period = %period,
            date = %header.date,
            entries = entries.len(),
            family_sales = summary.family_sales,
            vat_collected = summary.vat_collected,
            drawer_receipts = summary.drawer_receipts,
            disbursements = summary.disbursements,
            "journal generated"
        );
        if !balance.is_balanced() {
            warn!(
                run_id = %ctx.run_id,
                client = %ctx.client,
                debit = %balance.total_debit,
                credit = %balance.total_credit,
                difference = %balance.difference(),
                "journal is not balanced"
            );
        }

        JournalRun {
            period,
            header,
            entries,
            balance,
            summary,
        }
    }

    /// Builds the header shared by all lines.
    ///
    /// Without overrides the date is the last day of the report period and
    /// the label is `"{prefix} MM-YYYY"`. A date override moves both the date
    /// and the label's period; a label override replaces the label.
    #[must_use]
    pub fn posting_header(options: &PostingOptions, report_period: Period) -> (Period, PostingHeader) {
        let (period, date) = match options.date {
            Some(date) => (Period::containing(date), date),
            None => (report_period, report_period.last_day()),
        };

        let label = options
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map_or_else(
                || format!("{} {period}", options.label_prefix.trim()),
                str::to_string,
            );

        let header = PostingHeader {
            date,
            journal_code: options.journal_code.trim().to_string(),
            label,
        };
        (period, header)
    }
}
