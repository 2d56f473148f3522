use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Cadence of a recurring obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Calendar months per step for the month-based cadences.
    fn step_months(self) -> Option<i32> {
        match self {
            Frequency::Weekly => None,
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Yearly => Some(12),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(LedgerError::Validation(format!(
                "unknown frequency `{other}`"
            ))),
        }
    }
}

/// Returns the smallest date on the anchor's cadence that is >= `from`.
///
/// Month-based cadences preserve the anchor's day-of-month, clamped to the
/// last valid day of shorter months. Each occurrence is computed from the
/// anchor itself, so a clamped February never erases the anchor day: a
/// Jan 31 monthly cadence runs Feb 28 (or 29), Mar 31, Apr 30.
pub fn next_occurrence(anchor: NaiveDate, frequency: Frequency, from: NaiveDate) -> NaiveDate {
    if from <= anchor {
        return anchor;
    }
    match frequency.step_months() {
        None => {
            let days = (from - anchor).num_days();
            let steps = (days + 6).div_euclid(7);
            anchor + Duration::weeks(steps)
        }
        Some(step) => {
            let span =
                (from.year() - anchor.year()) * 12 + from.month() as i32 - anchor.month() as i32;
            let mut steps = (span / step).max(0);
            let mut candidate = add_months(anchor, steps * step);
            while candidate < from {
                steps += 1;
                candidate = add_months(anchor, steps * step);
            }
            candidate
        }
    }
}

/// The occurrence that follows `current` on the anchor's cadence.
pub fn occurrence_after(anchor: NaiveDate, frequency: Frequency, current: NaiveDate) -> NaiveDate {
    let next_day = current.succ_opt().unwrap_or(current);
    next_occurrence(anchor, frequency, next_day)
}

/// Adds calendar months, clamping the day to the end of shorter months.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
