//! Reporting period resolution.
//!
//! The period is read from a known cell of the family-sales sheet. Journal
//! lines are dated on the last day of that month.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::normalize::normalize_label;
use crate::source::Cell;

/// `MM/YYYY`, optionally preceded by a day (`DD/MM/YYYY`).
static NUMERIC_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(\d{1,2})/)?(\d{1,2})/(\d{4})\b").expect("valid period pattern")
});

/// French month name followed by a year (`SEPTEMBRE 2024`), on normalized text.
static NAMED_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(JANVIER|FEVRIER|MARS|AVRIL|MAI|JUIN|JUILLET|AOUT|SEPTEMBRE|OCTOBRE|NOVEMBRE|DECEMBRE)\s+(\d{4})\b",
    )
    .expect("valid month name pattern")
});

const MONTH_NAMES: [&str; 12] = [
    "JANVIER", "FEVRIER", "MARS", "AVRIL", "MAI", "JUIN", "JUILLET", "AOUT", "SEPTEMBRE",
    "OCTOBRE", "NOVEMBRE", "DECEMBRE",
];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first_day: NaiveDate,
}

impl Period {
    /// Creates a period for a month (1-12) and a four-digit year.
    #[must_use]
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Returns the period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Month number, 1-12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Last day of the month, the posting date of period-end entries.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Months::new(1) - Days::new(1)
    }
}

/// Formats as zero-padded `MM-YYYY`, the form used in posting labels.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

/// Reads a period from free text such as `"Période : 09/2024"`.
///
/// Accepts `MM/YYYY`, `DD/MM/YYYY` and French month names. The first token
/// with a valid month wins.
#[must_use]
pub fn parse_period_text(text: &str) -> Option<Period> {
    let numeric = NUMERIC_PERIOD.captures_iter(text).find_map(|caps| {
        let month = caps.get(2)?.as_str().parse().ok()?;
        let year = caps.get(3)?.as_str().parse().ok()?;
        Period::new(month, year)
    });
    if numeric.is_some() {
        return numeric;
    }

    let normalized = normalize_label(text);
    NAMED_PERIOD.captures(&normalized).and_then(|caps| {
        let name = caps.get(1)?.as_str();
        let index = MONTH_NAMES.iter().position(|m| *m == name)?;
        let month = u32::try_from(index + 1).ok()?;
        let year = caps.get(2)?.as_str().parse().ok()?;
        Period::new(month, year)
    })
}

/// Resolves the reporting period from the period cell.
///
/// Date cells give their month; text cells are scanned with
/// [`parse_period_text`]. Anything else falls back to the month of `today`.
#[must_use]
pub fn resolve_period(hint: &Cell, today: NaiveDate) -> Period {
    let found = match hint {
        Cell::Date(date) => Some(Period::containing(*date)),
        Cell::Text(text) => parse_period_text(text),
        Cell::Empty | Cell::Number(_) | Cell::Bool(_) => None,
    };

    found.unwrap_or_else(|| {
        debug!(?hint, %today, "no period in report, using current month");
        Period::containing(today)
    })
}
