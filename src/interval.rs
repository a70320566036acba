//! Inclusive month ranges and the merge/expand algebra over month sets

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::month::{months_between, Month, MonthIter};

/// Ordered, de-duplicated set of months
pub type MonthSet = BTreeSet<Month>;

/// Inclusive range of months `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRange {
    pub start: Month,
    pub end: Month,
}

impl MonthRange {
    pub fn new(start: Month, end: Month) -> Self {
        Self { start, end }
    }

    /// Range covering both months regardless of argument order
    pub fn spanning(a: Month, b: Month) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(month: Month) -> Self {
        Self::new(month, month)
    }

    /// Axis of `duration` months starting at `start`, cut off at `9999-12`.
    /// A zero duration gives an empty range.
    pub fn from_duration(start: Month, duration: u32) -> Self {
        if duration == 0 {
            return match start.add_months(-1) {
                Some(before) => Self::new(start, before),
                None => Self::new(Month::MAX, Month::MIN),
            };
        }
        let end = start
            .add_months(i64::from(duration) - 1)
            .unwrap_or(Month::MAX);
        Self::new(start, end)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        self.months().len()
    }

    pub fn contains(&self, month: Month) -> bool {
        self.start <= month && month <= self.end
    }

    pub fn months(&self) -> MonthIter {
        months_between(self.start, self.end)
    }

    /// Intersection with `bounds`, or `None` when they do not overlap
    pub fn clip(&self, bounds: &MonthRange) -> Option<MonthRange> {
        let clipped = MonthRange::new(self.start.max(bounds.start), self.end.min(bounds.end));
        (!clipped.is_empty()).then_some(clipped)
    }
}

impl IntoIterator for MonthRange {
    type Item = Month;
    type IntoIter = MonthIter;

    fn into_iter(self) -> MonthIter {
        self.months()
    }
}

/// Every month from `start` to `end` inclusive, collected into a set
pub fn range_to_months(start: Month, end: Month) -> MonthSet {
    months_between(start, end).collect()
}

/// Collapse a set of months into the minimal sorted list of disjoint,
/// non-adjacent inclusive ranges covering exactly those months.
///
/// Input order and duplicates do not matter.
pub fn months_to_ranges<I>(months: I) -> Vec<MonthRange>
where
    I: IntoIterator<Item = Month>,
{
    let sorted: MonthSet = months.into_iter().collect();
    let mut ranges: Vec<MonthRange> = Vec::new();

    for month in sorted {
        match ranges.last_mut() {
            Some(current) if current.end.succ() == Some(month) => current.end = month,
            _ => ranges.push(MonthRange::single(month)),
        }
    }

    ranges
}

/// Union of every month covered by `ranges`
pub fn expand_ranges<'a, I>(ranges: I) -> MonthSet
where
    I: IntoIterator<Item = &'a MonthRange>,
{
    ranges.into_iter().flat_map(|r| r.months()).collect()
}

/// Keep only the months inside `axis`
pub fn clip_to_axis(months: &MonthSet, axis: &MonthRange) -> MonthSet {
    if axis.is_empty() {
        return MonthSet::new();
    }
    months.range(axis.start..=axis.end).copied().collect()
}
