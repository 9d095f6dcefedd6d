use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use lectio_core::UserId;
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Half of a day's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Evening => "evening",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Period::Morning),
            "evening" => Ok(Period::Evening),
            other => Err(ProgressError::InvalidPeriod(other.to_string())),
        }
    }
}

/// `None` is never stored: an absent record reads as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionState {
    None,
    Partial,
    Complete,
}

/// Completion of one day's reading, keyed by `(user_id, date)`.
///
/// `completed_at` is set exactly when both flags are true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub user_id: UserId,
    pub date: NaiveDate,
    /// Plan day the reading was taken from.
    pub day_of_year: u32,
    pub morning_completed: bool,
    pub evening_completed: bool,
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl DailyProgress {
    /// A record with no flags set.
    pub fn new(user_id: UserId, date: NaiveDate, day_of_year: u32) -> Self {
        Self {
            user_id,
            date,
            day_of_year,
            morning_completed: false,
            evening_completed: false,
            completed_at: None,
        }
    }

    pub fn state(&self) -> CompletionState {
        match (self.morning_completed, self.evening_completed) {
            (true, true) => CompletionState::Complete,
            (false, false) => CompletionState::None,
            _ => CompletionState::Partial,
        }
    }

    pub fn is_marked(&self, period: Period) -> bool {
        match period {
            Period::Morning => self.morning_completed,
            Period::Evening => self.evening_completed,
        }
    }

    /// Set the flag for `period`. Returns `false` when it was already set,
    /// in which case nothing changes.
    pub fn mark(&mut self, period: Period, now: DateTime<FixedOffset>) -> bool {
        if self.is_marked(period) {
            return false;
        }
        match period {
            Period::Morning => self.morning_completed = true,
            Period::Evening => self.evening_completed = true,
        }
        if self.state() == CompletionState::Complete && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        true
    }
}

/// Completion of a weekly item on one date, keyed by
/// `(user_id, item_number, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub user_id: UserId,
    pub item_number: u32,
    pub date: NaiveDate,
    pub completed: bool,
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl WeeklyProgress {
    pub fn new(user_id: UserId, item_number: u32, date: NaiveDate) -> Self {
        Self {
            user_id,
            item_number,
            date,
            completed: false,
            completed_at: None,
        }
    }

    pub fn state(&self) -> CompletionState {
        if self.completed {
            CompletionState::Complete
        } else {
            CompletionState::None
        }
    }

    /// Single-flag model: one mark completes the record. Returns `false` if
    /// it was already complete.
    pub fn mark(&mut self, now: DateTime<FixedOffset>) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(now);
        true
    }
}
