use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One `(year, month)` reporting bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn succ(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

/// A set of month buckets, contiguous or not, that scopes one aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingPeriod {
    months: BTreeSet<MonthKey>,
}

impl ReportingPeriod {
    pub fn single(year: i32, month: u32) -> Self {
        Self {
            months: BTreeSet::from([MonthKey::new(year, month)]),
        }
    }

    /// Every month from `start` through `end`, inclusive.
    pub fn months(start: MonthKey, end: MonthKey) -> Self {
        let mut months = BTreeSet::new();
        let mut cursor = start;
        while cursor <= end {
            months.insert(cursor);
            cursor = cursor.succ();
        }
        Self { months }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = MonthKey>) -> Self {
        Self {
            months: keys.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.months.contains(&MonthKey::from_date(date))
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
