use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{CatechismError, Result};

/// Sunday that opens the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The calendar week a rotation item is active for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    /// Sunday; the key completion records are grouped under.
    pub start: NaiveDate,
    /// Saturday, inclusive.
    pub end: NaiveDate,
    /// Sunday the next item becomes active.
    pub next_rotation: NaiveDate,
}

impl WeekWindow {
    pub fn containing(date: NaiveDate) -> Self {
        let start = week_start(date);
        Self {
            start,
            end: start + Duration::days(6),
            next_rotation: start + Duration::days(7),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

/// Maps calendar weeks onto a cyclic corpus, one item per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyRotation {
    reference: NaiveDate,
}

impl Default for WeeklyRotation {
    /// Week zero is the week of Sunday 2024-01-07.
    fn default() -> Self {
        Self {
            reference: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl WeeklyRotation {
    /// `reference` is snapped back to its own week start, so any day of the
    /// intended week zero works.
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference: week_start(reference),
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Whole weeks between week zero and the week of `date`; negative before it.
    pub fn weeks_elapsed(&self, date: NaiveDate) -> i64 {
        (week_start(date) - self.reference).num_days().div_euclid(7)
    }

    /// 1-based ordinal of the item active during the week of `date`, within
    /// the `total_items` stored items.
    pub fn current_item(&self, date: NaiveDate, total_items: u32) -> Result<u32> {
        if total_items == 0 {
            return Err(CatechismError::NotSeeded);
        }
        let total = i64::from(total_items);
        let item = self.weeks_elapsed(date).rem_euclid(total) + 1;
        // rem_euclid keeps the value in [1, total]; the clamp only guards the cast.
        Ok(item.clamp(1, total) as u32)
    }
}
