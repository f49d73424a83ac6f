//! Property-based tests for the entry generators.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::BalanceCheck;
use super::entry::{EntryType, PostingHeader};
use super::generators::{disbursements, drawer_receipts, family_sales, vat_collected};
use crate::accounts::{AccountMapping, AccountResolver, LabelDetail};
use crate::source::{DisbursementRow, DrawerRow, FamilyRow, VatRow};

/// Strategy to generate an amount in cents, zero and negatives included.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a positive amount in cents.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a positive amount below 1000.
fn small_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a family or payment label, sometimes a total line.
fn row_label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{0,12}",
        Just("TOTAL".to_string()),
        Just("Sous-total".to_string()),
        Just("Espèces".to_string()),
        Just("CB".to_string()),
    ]
}

fn header() -> PostingHeader {
    PostingHeader {
        date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        journal_code: "VE".to_string(),
        label: "CA 09-2024".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every generated entry has exactly one positive side.
    #[test]
    fn prop_entries_have_one_positive_side(
        families in prop::collection::vec((row_label(), any_amount()), 0..10),
        drawer in prop::collection::vec((row_label(), any_amount()), 0..10),
        outflows in prop::collection::vec((row_label(), any_amount()), 0..10),
    ) {
        let mapping = AccountMapping::with_defaults();
        let resolver = AccountResolver::new(&mapping);
        let header = header();

        let family_rows: Vec<FamilyRow> =
            families.iter().map(|(l, a)| FamilyRow::new(l.as_str(), *a)).collect();
        let drawer_rows: Vec<DrawerRow> =
            drawer.iter().map(|(l, a)| DrawerRow::new(l, *a)).collect();
        let outflow_rows: Vec<DisbursementRow> =
            outflows.iter().map(|(l, a)| DisbursementRow::new(l.as_str(), *a)).collect();

        let mut entries = family_sales(&family_rows, &resolver, &header, LabelDetail::default());
        entries.extend(drawer_receipts(&drawer_rows, &resolver, &header));
        entries.extend(disbursements(&outflow_rows, &resolver, &header, LabelDetail::default()));

        for entry in &entries {
            prop_assert!(entry.amount() > Decimal::ZERO);
            let nonzero = [entry.debit(), entry.credit()]
                .iter()
                .filter(|v| **v != Decimal::ZERO)
                .count();
            prop_assert_eq!(nonzero, 1);
        }
    }

    /// Family sales emit exactly the positive, non-blank, non-total rows, in order.
    #[test]
    fn prop_family_sales_skip_law(
        families in prop::collection::vec((row_label(), any_amount()), 0..20),
    ) {
        let mapping = AccountMapping::with_defaults();
        let resolver = AccountResolver::new(&mapping);
        let rows: Vec<FamilyRow> =
            families.iter().map(|(l, a)| FamilyRow::new(l.as_str(), *a)).collect();

        let entries = family_sales(&rows, &resolver, &header(), LabelDetail::default());

        let expected: Vec<Decimal> = rows
            .iter()
            .filter(|r| !r.key.is_empty() && !r.key.contains("TOTAL") && r.amount > Decimal::ZERO)
            .map(|r| r.amount)
            .collect();
        let actual: Vec<Decimal> = entries.iter().map(|e| e.credit()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(entries.iter().all(|e| e.entry_type() == EntryType::Credit));
    }

    /// Sales plus VAT credited equal the drawer receipts plus the
    /// disbursements paid out of the drawer.
    #[test]
    fn prop_sales_and_vat_match_drawer_net_of_disbursements(
        sales in prop::collection::vec(positive_amount(), 1..8),
        vat in positive_amount(),
        outflows in prop::collection::vec(small_amount(), 0..4),
    ) {
        let mapping = AccountMapping::with_defaults();
        let resolver = AccountResolver::new(&mapping);
        let header = header();

        let credited: Decimal = sales.iter().copied().sum::<Decimal>() + vat;
        let paid_out: Decimal = outflows.iter().copied().sum();
        let received = credited - paid_out;
        prop_assume!(received > Decimal::ZERO);

        let family_rows: Vec<FamilyRow> = sales
            .iter()
            .enumerate()
            .map(|(i, a)| FamilyRow::new(format!("FAMILLE {i}"), *a))
            .collect();
        let vat_rows = vec![VatRow::new("TVA 20%", Some(Decimal::new(2, 1)), vat)];
        let drawer_rows = vec![DrawerRow::new("ESPECES", received)];
        let outflow_rows: Vec<DisbursementRow> = outflows
            .iter()
            .enumerate()
            .map(|(i, a)| DisbursementRow::new(format!("Sortie {i}"), -*a))
            .collect();

        let mut entries = family_sales(&family_rows, &resolver, &header, LabelDetail::default());
        entries.extend(vat_collected(&vat_rows, &resolver, &header, LabelDetail::default()));
        entries.extend(drawer_receipts(&drawer_rows, &resolver, &header));
        entries.extend(disbursements(&outflow_rows, &resolver, &header, LabelDetail::default()));

        let check = BalanceCheck::verify(&entries);
        prop_assert!(check.is_balanced());
        prop_assert_eq!(check.total_debit, credited);
        prop_assert_eq!(check.total_credit, credited);
    }

    /// Disbursements debit the absolute value of every nonzero amount.
    #[test]
    fn prop_disbursements_post_absolute_values(
        amounts in prop::collection::vec(any_amount(), 0..20),
    ) {
        let mapping = AccountMapping::with_defaults();
        let resolver = AccountResolver::new(&mapping);
        let rows: Vec<DisbursementRow> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| DisbursementRow::new(format!("Sortie {i}"), *a))
            .collect();

        let entries = disbursements(&rows, &resolver, &header(), LabelDetail::default());

        let expected: Decimal = amounts.iter().map(|a| a.abs()).sum();
        let debited: Decimal = entries.iter().map(|e| e.debit()).sum();
        prop_assert_eq!(debited, expected);
        prop_assert_eq!(entries.len(), amounts.iter().filter(|a| !a.is_zero()).count());
    }
}
