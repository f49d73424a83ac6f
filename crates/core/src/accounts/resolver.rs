//! Category to account resolution.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::mapping::{AccountMapping, AccountNumber, PaymentMethod};

/// Exact-match lookup with a fallback for absent keys.
#[must_use]
pub fn resolve<'a, K, Q>(
    key: &Q,
    table: &'a BTreeMap<K, AccountNumber>,
    fallback: &'a AccountNumber,
) -> &'a AccountNumber
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    table.get(key).unwrap_or(fallback)
}

/// Resolves report categories to ledger accounts for one client.
///
/// Keys are expected in normalized form (see [`crate::normalize`]).
#[derive(Debug, Clone, Copy)]
pub struct AccountResolver<'a> {
    mapping: &'a AccountMapping,
}

impl<'a> AccountResolver<'a> {
    /// Creates a resolver over a client mapping.
    #[must_use]
    pub fn new(mapping: &'a AccountMapping) -> Self {
        Self { mapping }
    }

    /// Account for a product family; unmapped families use the family fallback.
    #[must_use]
    pub fn family(&self, key: &str) -> &'a AccountNumber {
        resolve(key, self.mapping.families(), &self.mapping.fallbacks().family)
    }

    /// Account for a VAT rate; `None` when unmapped and no VAT fallback is set.
    #[must_use]
    pub fn vat(&self, rate: Decimal) -> Option<&'a AccountNumber> {
        self.mapping
            .vat_rates()
            .get(&rate)
            .or(self.mapping.fallbacks().vat.as_ref())
    }

    /// Account for a drawer label, matched by payment-method token.
    ///
    /// Labels matching no method, or a method the client did not map, use the
    /// receivable fallback.
    #[must_use]
    pub fn payment(&self, label: &str) -> (Option<PaymentMethod>, &'a AccountNumber) {
        let fallback = &self.mapping.fallbacks().receivable;
        match PaymentMethod::detect(label) {
            Some(method) => (
                Some(method),
                resolve(&method, self.mapping.payment_methods(), fallback),
            ),
            None => (None, fallback),
        }
    }

    /// The single disbursement account.
    #[must_use]
    pub fn disbursement(&self) -> &'a AccountNumber {
        self.mapping.disbursement()
    }
}
