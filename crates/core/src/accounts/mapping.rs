//! Per-client chart-of-accounts mapping.
//!
//! A client file looks like:
//!
//! ```toml
//! disbursement_account = "65800000"
//!
//! [families]
//! BOISSONS = "707100000"
//!
//! [vat_rates]
//! "0.20" = "445710080"
//!
//! [payment_methods]
//! cash = "530000000"
//!
//! [fallbacks]
//! family = "707000000"
//! receivable = "411100000"
//!
//! [labels]
//! family = true
//! ```
//!
//! Every table is optional. Account numbers must be quoted so leading zeros
//! survive.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::MappingError;
use crate::normalize::{normalize_label, normalize_rate, parse_rate};

/// Account for family sales with no mapping.
pub const DEFAULT_FAMILY_ACCOUNT: &str = "707000000";
/// Account for drawer receipts whose payment method is unknown or unmapped.
pub const DEFAULT_RECEIVABLE_ACCOUNT: &str = "411100000";
/// Account for disbursements when the client sets none.
pub const DEFAULT_DISBURSEMENT_ACCOUNT: &str = "65800000";

/// Legacy VAT accounts: 5.5%, 10% and 20%.
const DEFAULT_VAT_ACCOUNTS: [(&str, &str); 3] = [
    ("0.055", "445710060"),
    ("0.10", "445710090"),
    ("0.20", "445710080"),
];

/// Legacy drawer accounts, in payment-method order.
const DEFAULT_PAYMENT_ACCOUNTS: [(PaymentMethod, &str); 4] = [
    (PaymentMethod::Cash, "530000000"),
    (PaymentMethod::Card, "411100003"),
    (PaymentMethod::Check, "411100004"),
    (PaymentMethod::Transfer, "411100005"),
];

/// A ledger account number.
///
/// Kept as text: leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Parses an account number, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountNumber` unless the value is non-empty ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let value = raw.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MappingError::InvalidAccountNumber(raw.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the account number as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds one of the literal defaults declared in this module.
    fn known(value: &'static str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = MappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountNumber> for String {
    fn from(account: AccountNumber) -> Self {
        account.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical payment methods of the cash drawer, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash (`ESPECES`).
    Cash,
    /// Bank card (`CB`, `CARTE`).
    Card,
    /// Cheque (`CHEQUE`).
    Check,
    /// Bank transfer (`VIREMENT`).
    Transfer,
}

impl PaymentMethod {
    /// All methods, in the order labels are matched against them.
    pub const ALL: [Self; 4] = [Self::Cash, Self::Card, Self::Check, Self::Transfer];

    /// Tokens identifying the method inside a normalized drawer label.
    #[must_use]
    pub const fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::Cash => &["ESPECES"],
            Self::Card => &["CB", "CARTE"],
            Self::Check => &["CHEQUE"],
            Self::Transfer => &["VIREMENT"],
        }
    }

    /// Finds the first method whose token is contained in a normalized label.
    #[must_use]
    pub fn detect(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.tokens().iter().any(|token| label.contains(token)))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
            Self::Check => write!(f, "check"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// Accounts used when a category has no mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    /// Unmapped product families.
    pub family: AccountNumber,
    /// Drawer labels matching no configured payment method.
    pub receivable: AccountNumber,
    /// Unmapped VAT rates; `None` skips those rows.
    pub vat: Option<AccountNumber>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            family: AccountNumber::known(DEFAULT_FAMILY_ACCOUNT),
            receivable: AccountNumber::known(DEFAULT_RECEIVABLE_ACCOUNT),
            vat: None,
        }
    }
}

/// Which generators append their category to the posting label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LabelDetail {
    /// `"CA 09-2024 - BOISSONS"` instead of `"CA 09-2024"`.
    pub family: bool,
    /// `"CA 09-2024 - TVA 20%"` instead of `"CA 09-2024"`.
    pub vat: bool,
    /// `"CA 09-2024 - Timbres"` instead of `"CA 09-2024"`.
    pub disbursement: bool,
}

impl Default for LabelDetail {
    fn default() -> Self {
        Self {
            family: true,
            vat: true,
            disbursement: true,
        }
    }
}

/// Client file shape before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAccountMapping {
    families: BTreeMap<String, AccountNumber>,
    vat_rates: Option<BTreeMap<String, AccountNumber>>,
    payment_methods: Option<BTreeMap<PaymentMethod, AccountNumber>>,
    disbursement_account: Option<AccountNumber>,
    fallbacks: Fallbacks,
    labels: LabelDetail,
}

/// A client's account mapping, validated at load time and read-only during a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAccountMapping")]
pub struct AccountMapping {
    families: BTreeMap<String, AccountNumber>,
    vat_rates: BTreeMap<Decimal, AccountNumber>,
    payment_methods: BTreeMap<PaymentMethod, AccountNumber>,
    disbursement: AccountNumber,
    fallbacks: Fallbacks,
    labels: LabelDetail,
}

impl Default for AccountMapping {
    /// An empty mapping: every category resolves to its fallback.
    fn default() -> Self {
        Self {
            families: BTreeMap::new(),
            vat_rates: BTreeMap::new(),
            payment_methods: BTreeMap::new(),
            disbursement: AccountNumber::known(DEFAULT_DISBURSEMENT_ACCOUNT),
            fallbacks: Fallbacks::default(),
            labels: LabelDetail::default(),
        }
    }
}

impl AccountMapping {
    /// A mapping pre-filled with the legacy VAT and drawer accounts.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            vat_rates: default_vat_rates(),
            payment_methods: default_payment_methods(),
            ..Self::default()
        }
    }

    /// Maps a family name (normalized before storing).
    #[must_use]
    pub fn with_family(mut self, family: &str, account: AccountNumber) -> Self {
        self.families.insert(normalize_label(family), account);
        self
    }

    /// Maps a VAT rate fraction (rounded like parsed rates).
    #[must_use]
    pub fn with_vat_rate(mut self, rate: Decimal, account: AccountNumber) -> Self {
        self.vat_rates.insert(normalize_rate(rate), account);
        self
    }

    /// Maps a payment method.
    #[must_use]
    pub fn with_payment_method(mut self, method: PaymentMethod, account: AccountNumber) -> Self {
        self.payment_methods.insert(method, account);
        self
    }

    /// Sets the disbursement account.
    #[must_use]
    pub fn with_disbursement(mut self, account: AccountNumber) -> Self {
        self.disbursement = account;
        self
    }

    /// Replaces the fallback accounts.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: Fallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Replaces the label detail flags.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelDetail) -> Self {
        self.labels = labels;
        self
    }

    /// Family table, keyed by normalized name.
    #[must_use]
    pub fn families(&self) -> &BTreeMap<String, AccountNumber> {
        &self.families
    }

    /// VAT table, keyed by rate fraction.
    #[must_use]
    pub fn vat_rates(&self) -> &BTreeMap<Decimal, AccountNumber> {
        &self.vat_rates
    }

    /// Drawer table, keyed by payment method.
    #[must_use]
    pub fn payment_methods(&self) -> &BTreeMap<PaymentMethod, AccountNumber> {
        &self.payment_methods
    }

    /// Account receiving every disbursement.
    #[must_use]
    pub fn disbursement(&self) -> &AccountNumber {
        &self.disbursement
    }

    /// Fallback accounts.
    #[must_use]
    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    /// Label detail flags.
    #[must_use]
    pub fn labels(&self) -> LabelDetail {
        self.labels
    }
}

impl TryFrom<RawAccountMapping> for AccountMapping {
    type Error = MappingError;

    fn try_from(raw: RawAccountMapping) -> Result<Self, Self::Error> {
        let mut families = BTreeMap::new();
        for (name, account) in raw.families {
            let key = normalize_label(&name);
            if key.is_empty() {
                return Err(MappingError::BlankFamily);
            }
            if families.insert(key.clone(), account).is_some() {
                return Err(MappingError::DuplicateFamily(key));
            }
        }

        let vat_rates = match raw.vat_rates {
            Some(table) => {
                let mut rates = BTreeMap::new();
                for (key, account) in table {
                    let rate = parse_rate(&key).ok_or_else(|| MappingError::InvalidRate(key.clone()))?;
                    if rates.insert(rate, account).is_some() {
                        return Err(MappingError::DuplicateRate(rate.to_string()));
                    }
                }
                rates
            }
            None => default_vat_rates(),
        };

        Ok(Self {
            families,
            vat_rates,
            payment_methods: raw.payment_methods.unwrap_or_else(default_payment_methods),
            disbursement: raw
                .disbursement_account
                .unwrap_or_else(|| AccountNumber::known(DEFAULT_DISBURSEMENT_ACCOUNT)),
            fallbacks: raw.fallbacks,
            labels: raw.labels,
        })
    }
}

fn default_vat_rates() -> BTreeMap<Decimal, AccountNumber> {
    DEFAULT_VAT_ACCOUNTS
        .iter()
        .filter_map(|(rate, account)| Some((parse_rate(rate)?, AccountNumber::known(account))))
        .collect()
}

fn default_payment_methods() -> BTreeMap<PaymentMethod, AccountNumber> {
    DEFAULT_PAYMENT_ACCOUNTS
        .iter()
        .map(|(method, account)| (*method, AccountNumber::known(account)))
        .collect()
}
