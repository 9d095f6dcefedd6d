use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use lectio_core::UserId;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::ProgressStore;
use crate::types::{DailyProgress, Period, WeeklyProgress};

/// Applies completion marks on top of an injected [`ProgressStore`].
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub fn daily(&self, user: &UserId, date: NaiveDate) -> Result<Option<DailyProgress>> {
        self.store.get_daily(user, date)
    }

    /// Mark one half of `date`'s reading done.
    ///
    /// Re-marking a period that is already set returns the stored record
    /// without writing.
    pub fn mark_daily(
        &self,
        user: &UserId,
        date: NaiveDate,
        day_of_year: u32,
        period: Period,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyProgress> {
        let mut record = self
            .store
            .get_daily(user, date)?
            .unwrap_or_else(|| DailyProgress::new(user.clone(), date, day_of_year));

        if !record.mark(period, now) {
            debug!(user = %user, %date, %period, "already marked");
            return Ok(record);
        }

        let stored = self.store.upsert_daily(&record, now)?;
        info!(
            user = %user,
            %date,
            %period,
            state = ?stored.state(),
            "daily reading marked"
        );
        Ok(stored)
    }

    /// Records for `item_number` within `start..=end`.
    pub fn weekly(
        &self,
        user: &UserId,
        item_number: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeeklyProgress>> {
        self.store.get_weekly_range(user, item_number, start, end)
    }

    /// Mark `item_number` done on `date`. Each date gets its own record.
    pub fn mark_weekly(
        &self,
        user: &UserId,
        item_number: u32,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyProgress> {
        let existing = self
            .store
            .get_weekly_range(user, item_number, date, date)?
            .into_iter()
            .next();
        let mut record =
            existing.unwrap_or_else(|| WeeklyProgress::new(user.clone(), item_number, date));

        if !record.mark(now) {
            debug!(user = %user, item_number, %date, "already marked");
            return Ok(record);
        }

        let stored = self.store.upsert_weekly(&record, now)?;
        info!(user = %user, item_number, %date, "weekly item marked");
        Ok(stored)
    }

    /// Daily history, newest first.
    pub fn daily_history(&self, user: &UserId) -> Result<Vec<DailyProgress>> {
        self.store.list_daily(user)
    }

    /// Weekly history, newest first.
    pub fn weekly_history(&self, user: &UserId) -> Result<Vec<WeeklyProgress>> {
        self.store.list_weekly(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteProgressStore;
    use crate::types::CompletionState;
    use rusqlite::Connection;

    fn tracker() -> ProgressTracker {
        let store = SqliteProgressStore::new(Connection::open_in_memory().unwrap()).unwrap();
        ProgressTracker::new(Arc::new(store))
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn both_orders_reach_complete() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let t = at("2024-03-01T21:00:00-03:00");
        for order in [
            [Period::Morning, Period::Evening],
            [Period::Evening, Period::Morning],
        ] {
            let tr = tracker();
            let user = UserId::from("ana");
            let first = tr.mark_daily(&user, date, 61, order[0], t).unwrap();
            assert_eq!(first.state(), CompletionState::Partial);
            let second = tr.mark_daily(&user, date, 61, order[1], t).unwrap();
            assert_eq!(second.state(), CompletionState::Complete);
            assert_eq!(second.completed_at, Some(t));
        }
    }

    #[test]
    fn remark_returns_the_stored_record_unchanged() {
        let tr = tracker();
        let user = UserId::from("ana");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let first = tr
            .mark_daily(&user, date, 61, Period::Morning, at("2024-03-01T07:00:00-03:00"))
            .unwrap();
        let again = tr
            .mark_daily(&user, date, 61, Period::Morning, at("2024-03-01T09:00:00-03:00"))
            .unwrap();
        assert_eq!(first, again);
        assert_eq!(tr.daily_history(&user).unwrap().len(), 1);
    }

    #[test]
    fn unmarked_day_has_no_record() {
        let tr = tracker();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(tr.daily(&UserId::from("ana"), date).unwrap(), None);
    }

    #[test]
    fn weekly_marks_on_different_days_are_separate_records() {
        let tr = tracker();
        let user = UserId::from("ana");
        let sun = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let wed = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let sat = NaiveDate::from_ymd_opt(2024, 3, 23).unwrap();
        let t = at("2024-03-20T10:00:00-03:00");

        tr.mark_weekly(&user, 11, sun, t).unwrap();
        tr.mark_weekly(&user, 11, wed, t).unwrap();
        tr.mark_weekly(&user, 11, wed, t).unwrap();

        let week = tr.weekly(&user, 11, sun, sat).unwrap();
        assert_eq!(week.len(), 2);
        assert!(week.iter().all(|w| w.completed));
        assert_eq!(tr.weekly_history(&user).unwrap().len(), 2);
    }
}
