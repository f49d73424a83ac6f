//! Integration tests for the report-to-journal pipeline.
//!
//! Builds an in-memory workbook laid out like a real sales report, runs the
//! journal service and checks the exported bytes.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use salesjournal_core::accounts::AccountMapping;
use salesjournal_core::export::{ExportFormat, ExportOptions};
use salesjournal_core::journal::{JournalRun, JournalService, PostingOptions, RunContext};
use salesjournal_core::source::{Cell, RawSheet, RawWorkbook, SourceError, SourceReport};
use salesjournal_shared::config::SourceConfig;

fn text(s: &str) -> Cell {
    Cell::text(s)
}

fn num(d: Decimal) -> Cell {
    Cell::Number(d)
}

/// Two filler rows, then the header on line 3.
fn sheet(name: &str, first_cell: Cell, header: &[&str], rows: Vec<Vec<Cell>>) -> RawSheet {
    let mut all = vec![vec![first_cell], vec![]];
    all.push(header.iter().map(|h| text(h)).collect());
    all.extend(rows);
    RawSheet::new(name, all)
}

/// Lays out the four report sheets around the given data rows.
fn report(
    families: Vec<Vec<Cell>>,
    vat: Vec<Vec<Cell>>,
    drawer: Vec<Vec<Cell>>,
    outflows: Vec<Vec<Cell>>,
) -> RawWorkbook {
    let families = sheet(
        "ANALYSE FAMILLES",
        text("Période du 01/09/2024 au 30/09/2024"),
        &["FAMILLE", "CA HT"],
        families,
    );
    let vat = sheet("ANALYSE TVA", Cell::Empty, &["LIBELLE TVA", "Taux", "TVA"], vat);
    let drawer = sheet("Solde tiroir", Cell::Empty, &["Paiement", "Montant en euro"], drawer);
    let mut disbursement_rows = vec![vec![]; 6];
    disbursement_rows.push(vec![text("Libellé"), text("Montant en euro")]);
    disbursement_rows.extend(outflows);
    let disbursements = RawSheet::new("Point comptable", disbursement_rows);

    RawWorkbook::new(vec![families, vat, drawer, disbursements])
}

fn workbook() -> RawWorkbook {
    report(
        vec![
            vec![text("BOISSONS"), num(dec!(200.00))],
            vec![text("Cigarettes"), num(dec!(1000.00))],
            vec![text("Presse"), text("0")],
            vec![Cell::Empty, Cell::Empty],
            vec![text("TOTAL"), num(dec!(1200.00))],
        ],
        vec![
            vec![text("TVA 20%"), num(dec!(20)), num(dec!(40.00))],
            vec![text("Exonéré"), num(dec!(0)), num(dec!(0))],
            vec![text("Total"), Cell::Empty, num(dec!(40.00))],
        ],
        vec![
            vec![text("Espèces"), text("240,00 €")],
            vec![text("Carte bancaire"), num(dec!(1000))],
            vec![text("Total"), num(dec!(1240))],
        ],
        vec![
            vec![text("Timbres"), num(dec!(-12.40))],
            vec![text("Total sorties"), num(dec!(-12.40))],
        ],
    )
}

fn mapping() -> AccountMapping {
    serde_json::from_str(
        r#"{
            "families": { "Boissons": "707100000", "Cigarettes": "707200000" },
            "vat_rates": { "20": "445710080" },
            "payment_methods": { "cash": "530000000", "card": "511200000" },
            "disbursement_account": "467700000"
        }"#,
    )
    .unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
}

fn run(workbook: &RawWorkbook) -> JournalRun {
    let report = SourceReport::from_workbook(workbook, &SourceConfig::default()).unwrap();
    let ctx = RunContext::new("alice", "tabac-du-port", mapping(), PostingOptions::default());
    JournalService::run(&ctx, &report, today())
}

fn export(format: ExportFormat, options: &ExportOptions) -> String {
    write(&run(&workbook()), format, options)
}

fn write(run: &JournalRun, format: ExportFormat, options: &ExportOptions) -> String {
    let mut buf = Vec::new();
    format.write(&mut buf, &run.entries, options).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Sums the DEBIT and CREDIT columns of `;`/`,` formatted output.
fn column_totals(csv: &str) -> (Decimal, Decimal) {
    csv.lines().skip(1).fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), line| {
        let fields: Vec<&str> = line.split(';').collect();
        let amount = |i: usize| Decimal::from_str(&fields[i].replace(',', ".")).unwrap();
        (debit + amount(4), credit + amount(5))
    })
}

#[test]
fn test_workbook_to_csv() {
    let csv = export(ExportFormat::Csv, &ExportOptions::default());

    let expected = "\
DATE;CODE JOURNAL;NUMERO DE COMPTE;LIBELLE;DEBIT;CREDIT
30/09/2024;VE;707100000;CA 09-2024 - BOISSONS;0,00;200,00
30/09/2024;VE;707200000;CA 09-2024 - Cigarettes;0,00;1000,00
30/09/2024;VE;445710080;CA 09-2024 - TVA 20%;0,00;40,00
30/09/2024;VE;530000000;CA 09-2024;240,00;0,00
30/09/2024;VE;511200000;CA 09-2024;1000,00;0,00
30/09/2024;VE;467700000;CA 09-2024 - Timbres;12,40;0,00
";
    assert_eq!(csv, expected);
}

#[test]
fn test_workbook_journal_balance() {
    let run = run(&workbook());

    // The drawer total already includes the stamps paid out of it.
    assert!(!run.balance.is_balanced());
    assert_eq!(run.balance.total_credit, dec!(1240.00));
    assert_eq!(run.balance.total_debit, dec!(1252.40));
    assert_eq!(run.summary.total(), 6);
}

#[test]
fn test_drawer_net_of_disbursements_balances() {
    let workbook = report(
        vec![
            vec![text("BOISSONS"), num(dec!(200.00))],
            vec![text("Cigarettes"), num(dec!(1000.00))],
        ],
        vec![vec![text("TVA 20%"), num(dec!(20)), num(dec!(40.00))]],
        vec![
            vec![text("Espèces"), num(dec!(217.60))],
            vec![text("Carte bancaire"), num(dec!(1000))],
        ],
        vec![
            vec![text("Timbres"), num(dec!(-12.40))],
            vec![text("Fournitures"), text("-10,00")],
        ],
    );
    let run = run(&workbook);

    assert_eq!(run.summary.disbursements, 2);
    assert!(run.balance.is_balanced());
    assert_eq!(run.balance.total_debit, dec!(1240.00));

    let csv = write(&run, ExportFormat::Csv, &ExportOptions::default());
    assert_eq!(column_totals(&csv), (dec!(1240.00), dec!(1240.00)));
}

#[test]
fn test_exported_columns_agree_with_balance_check() {
    let workbook = report(
        vec![
            vec![text("BOISSONS"), num(dec!(10.005))],
            vec![text("Cigarettes"), num(dec!(10.005))],
        ],
        vec![],
        vec![vec![text("Espèces"), num(dec!(20.01))]],
        vec![],
    );
    let run = run(&workbook);
    let csv = write(&run, ExportFormat::Csv, &ExportOptions::default());

    let (debit, credit) = column_totals(&csv);
    assert_eq!(debit, run.balance.total_debit);
    assert_eq!(credit, run.balance.total_credit);
    assert_eq!(credit, dec!(20.02));
    assert!(!run.balance.is_balanced());
}

#[test]
fn test_csv_export_is_byte_identical_across_runs() {
    let options = ExportOptions::default();
    assert_eq!(
        export(ExportFormat::Csv, &options),
        export(ExportFormat::Csv, &options)
    );
}

#[test]
fn test_workbook_to_json() {
    let json = export(ExportFormat::Json, &ExportOptions::default());
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(rows.as_array().map(Vec::len), Some(6));
    assert_eq!(rows[3]["NUMERO DE COMPTE"], "530000000");
    assert_eq!(rows[3]["DEBIT"], "240,00");
}

#[test]
fn test_missing_sheet_is_reported() {
    let mut sheets = workbook().sheets;
    sheets.retain(|s| s.name != "ANALYSE TVA");
    let err = SourceReport::from_workbook(&RawWorkbook::new(sheets), &SourceConfig::default())
        .unwrap_err();

    assert!(matches!(err, SourceError::MissingSheet { .. }));
    assert_eq!(err.error_code(), "MISSING_SHEET");
}
