//! Calendar month token
//!
//! A `Month` is serialized as the lexical form `YYYY-MM`. The derived
//! ordering (year, then month) is chronological, and because both parts are
//! zero-padded in the token the string ordering of tokens agrees with it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Largest year that still renders as a four-digit token
pub const MAX_YEAR: i32 = 9999;

/// A single calendar month, e.g. `2024-05`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    /// 1-12
    month: u32,
}

impl Month {
    /// `0000-01`
    pub const MIN: Month = Month { year: 0, month: 1 };
    /// `9999-12`
    pub const MAX: Month = Month {
        year: MAX_YEAR,
        month: 12,
    };

    /// Build a month, returning `None` when the month number is not 1-12 or the
    /// year cannot be written as four digits.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Month containing the given date, if its year fits the token form
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months elapsed since `0000-01`
    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        Self::new(year, index.rem_euclid(12) as u32 + 1)
    }

    /// Shift by `n` months (negative moves backwards), rolling the year over
    /// in either direction. `None` when the result falls outside
    /// `0000-01..=9999-12`.
    pub fn add_months(self, n: i64) -> Option<Self> {
        Self::from_index(self.index().checked_add(n)?)
    }

    /// The following month, `None` after `9999-12`
    pub fn succ(self) -> Option<Self> {
        self.add_months(1)
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(&self, other: Month) -> i64 {
        other.index() - self.index()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let digits_ok = bytes[..4]
            .iter()
            .chain(&bytes[5..])
            .all(|b| b.is_ascii_digit());
        if !digits_ok {
            return Err(invalid());
        }
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[5..].parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Month {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Inclusive iterator over consecutive months
///
/// Cloning the iterator (or calling [`months_between`] again) restarts the
/// sequence.
#[derive(Debug, Clone)]
pub struct MonthIter {
    next: Month,
    last: Month,
    done: bool,
}

impl Iterator for MonthIter {
    type Item = Month;

    fn next(&mut self) -> Option<Month> {
        if self.done {
            return None;
        }
        let current = self.next;
        match current.succ() {
            Some(next) if current < self.last => self.next = next,
            _ => self.done = true,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            (self.next.months_until(self.last) + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthIter {}

/// Every month from `start` to `end` inclusive; empty when `start > end`
pub fn months_between(start: Month, end: Month) -> MonthIter {
    MonthIter {
        next: start,
        last: end,
        done: start > end,
    }
}
