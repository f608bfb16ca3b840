//! Billing months and the rule deciding which payments count as "this month".
//!
//! Payments store their billing month as a `YYYY-MM` string. [`BillingMonth`] is the
//! validated form of that string, and [`MonthMatch`] is the configurable policy the
//! dashboard uses to bucket payments against a reference month.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A calendar month identifying which month's charge a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

impl BillingMonth {
    /// Builds a billing month, rejecting months outside 1..=12 and years outside 0..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(Error::InvalidMonth {
                value: format!("{year}-{month}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month on the UTC clock.
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingMonth {
    type Err = Error;

    /// Parses strictly `YYYY-MM`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// Policy deciding whether a payment's billing month falls in the reference month's bucket.
///
/// Configured in `config.toml` under `[dashboard] month_match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MonthMatch {
    /// The billing month equals the reference month.
    #[default]
    Exact,
    /// The billing month starts with `"{reference year}-"`.
    SameYear,
    /// The billing month equals the reference month, or starts with `"{year}"`.
    ///
    /// With `year = 2024` this buckets payments like the legacy dashboard, which lumped
    /// every 2024 payment into "this month". `paid_vehicles` still counts distinct
    /// vehicles, where the legacy dashboard counted Paid payments.
    YearPrefix {
        /// Fixed year prefix
        year: i32,
    },
}

impl MonthMatch {
    /// Returns true when `month` (a stored `YYYY-MM` string) belongs to the bucket of `reference`.
    #[must_use]
    pub fn matches(self, month: &str, reference: BillingMonth) -> bool {
        let month = month.trim();
        let exact = month == reference.to_string();
        match self {
            Self::Exact => exact,
            Self::SameYear => month.starts_with(&format!("{:04}-", reference.year())),
            Self::YearPrefix { year } => exact || month.starts_with(&format!("{year:04}")),
        }
    }
}
