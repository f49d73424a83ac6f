//! Lenient numeric and text normalization for report cells.
//!
//! Sales reports are typed by hand: amounts carry currency symbols and
//! thousands spaces, rates come as `20`, `20%` or `0,20`, and family names
//! drift between accented and unaccented spellings. Nothing here fails:
//! amounts degrade to zero, rates to `None`.

use std::str::FromStr;

use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Currency symbols stripped from amounts.
const CURRENCY_SYMBOLS: [char; 3] = ['€', '$', '£'];

/// Rates are kept to this many decimal places (5.5% is `0.055`).
pub const RATE_DECIMAL_PLACES: u32 = 3;

/// Parses a free-text amount such as `"1 234,56 €"`.
///
/// Returns zero for empty or unparseable input. Zero therefore means
/// "absent or invalid"; callers must filter on strictly positive amounts
/// where zero is not a meaningful reading.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Parses a free-text VAT rate into a fraction.
///
/// `"20"`, `"20%"`, `"0,20"` and `"0.2"` all yield `0.20`. Returns `None` for
/// empty or unparseable input so an absent rate stays distinct from `0%`.
#[must_use]
pub fn parse_rate(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).ok().map(normalize_rate)
}

/// Brings a numeric rate to fraction form, rounded to three places.
///
/// Values above 1 are read as percentages.
#[must_use]
pub fn normalize_rate(value: Decimal) -> Decimal {
    let fraction = if value > Decimal::ONE {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    };
    fraction.round_dp(RATE_DECIMAL_PLACES)
}

/// Canonical form of a category label: trimmed, upper-cased, without accents.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Formats a rate fraction as a percentage without trailing zeros (`0.055` → `5.5`).
#[must_use]
pub fn format_percent(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED).normalize().to_string()
}
