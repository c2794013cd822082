//! Publication periods and period filters.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::entry::RankingEntry;

/// A (year, month) pair identifying one publication snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: String,
    pub month: i64,
}

impl Period {
    pub fn new(year: impl Into<String>, month: i64) -> Self {
        Self {
            year: year.into(),
            month,
        }
    }

    /// Numeric value of the year for chronological ordering; non-numeric years sort as 0.
    pub fn year_sort_key(&self) -> i64 {
        if !self.year.is_empty() && self.year.chars().all(|c| c.is_ascii_digit()) {
            self.year.parse().unwrap_or(0)
        } else {
            0
        }
    }

    /// Chronological order: numeric year, then month, then year text.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        (self.year_sort_key(), self.month, &self.year).cmp(&(
            other.year_sort_key(),
            other.month,
            &other.year,
        ))
    }

    /// The filter selecting exactly this period.
    pub fn as_filter(&self) -> PeriodFilter {
        PeriodFilter {
            year: Some(self.year.clone()),
            month: Some(self.month),
        }
    }
}

/// Optional year/month constraint applied to ranking entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub year: Option<String>,
    pub month: Option<i64>,
}

impl PeriodFilter {
    pub const fn any() -> Self {
        Self {
            year: None,
            month: None,
        }
    }

    pub fn new(year: Option<String>, month: Option<i64>) -> Self {
        Self { year, month }
    }

    /// True when neither year nor month is set; this is the condition under
    /// which the "latest period" default applies.
    pub const fn is_unset(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// Replace an unset filter with `latest`, if one is known.
    pub fn or_latest(self, latest: Option<Period>) -> Self {
        match latest {
            Some(period) if self.is_unset() => period.as_filter(),
            _ => self,
        }
    }

    /// Year compares as text; month compares as an integer and a month that
    /// cannot be read as one never matches.
    pub fn matches(&self, entry: &RankingEntry) -> bool {
        if let Some(year) = &self.year {
            if entry.year_text().as_deref() != Some(year.as_str()) {
                return false;
            }
        }
        if let Some(month) = self.month {
            if entry.month() != Some(month) {
                return false;
            }
        }
        true
    }
}
