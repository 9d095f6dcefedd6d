//! The scheduling operations exposed to the transport layer.
//!
//! Everything here is synchronous and derives "today" from the `now` it is
//! handed; handlers pass the injected clock's reading.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use lectio_catechism::{CatechismStore, WeekWindow, WeeklyItem, WeeklyRotation};
use lectio_core::{LectioError, Result, UserId};
use lectio_plan::{cyclic, Assignment, PlanError, PlanStore};
use lectio_progress::{DailyProgress, Period, ProgressTracker, WeeklyProgress};
use serde::Serialize;
use tracing::debug;

/// Which half of the day's reading to suggest, from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Evening,
    All,
}

impl DayPeriod {
    /// 06:00–11:59 morning, 18:00–22:59 evening, anything else both.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            18..=22 => DayPeriod::Evening,
            _ => DayPeriod::All,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Today {
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub period: DayPeriod,
    pub readings: Assignment,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentItem {
    pub question_number: u32,
    pub total_questions: u32,
    pub question: WeeklyItem,
    #[serde(flatten)]
    pub week: WeekWindow,
}

/// Reading plan, weekly rotation, and completion tracking behind one facade.
#[derive(Clone)]
pub struct Scheduler {
    plan: Arc<dyn PlanStore>,
    catechism: Arc<dyn CatechismStore>,
    progress: ProgressTracker,
    rotation: WeeklyRotation,
    plan_days: NonZeroU32,
}

impl Scheduler {
    pub fn new(
        plan: Arc<dyn PlanStore>,
        catechism: Arc<dyn CatechismStore>,
        progress: ProgressTracker,
        rotation: WeeklyRotation,
        plan_days: NonZeroU32,
    ) -> Self {
        Self {
            plan,
            catechism,
            progress,
            rotation,
            plan_days,
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Plan slot for a calendar date. Days past the end of the plan (366 in
    /// a leap year) wrap around to the start.
    pub fn plan_day(&self, date: NaiveDate) -> u32 {
        cyclic::assign(self.plan_days, date.ordinal())
    }

    pub fn plan_count(&self) -> Result<u32> {
        Ok(self.plan.count()?)
    }

    pub fn catechism_count(&self) -> Result<u32> {
        Ok(self.catechism.count()?)
    }

    /// Assignment for an explicit plan day.
    pub fn assignment(&self, day: u32) -> Result<Assignment> {
        let plan_days = self.plan_days.get();
        if !(1..=plan_days).contains(&day) {
            return Err(PlanError::DayOutOfRange { day, plan_days }.into());
        }
        match self.plan.get(day)? {
            Some(a) => Ok(a),
            None if self.plan.count()? == 0 => Err(PlanError::NotSeeded.into()),
            None => Err(LectioError::NotFound(format!("no reading for day {day}"))),
        }
    }

    pub fn resolve_today(&self, now: DateTime<FixedOffset>) -> Result<Today> {
        let date = now.date_naive();
        let day_of_year = self.plan_day(date);
        let readings = self.assignment(day_of_year)?;
        debug!(%date, day_of_year, "resolved today's reading");
        Ok(Today {
            date,
            day_of_year,
            period: DayPeriod::from_hour(now.hour()),
            readings,
        })
    }

    /// Question active during the week of `date`. The rotation picks an
    /// ordinal among the stored questions; the reported number is the
    /// question's own, which differs when the numbering has gaps.
    pub fn resolve_weekly_item(&self, date: NaiveDate) -> Result<CurrentItem> {
        let total = self.catechism.count()?;
        let ordinal = self.rotation.current_item(date, total)?;
        let question = self
            .catechism
            .nth(ordinal)?
            .ok_or(lectio_catechism::CatechismError::NotFound { number: ordinal })?;
        Ok(CurrentItem {
            question_number: question.question_number,
            total_questions: total,
            question,
            week: WeekWindow::containing(date),
        })
    }

    pub fn resolve_current_weekly_item(&self, now: DateTime<FixedOffset>) -> Result<CurrentItem> {
        self.resolve_weekly_item(now.date_naive())
    }

    /// The user's record for `date`, or a blank one if nothing is marked yet.
    pub fn daily_progress(&self, user: &UserId, date: NaiveDate) -> Result<DailyProgress> {
        let existing = self.progress.daily(user, date)?;
        Ok(existing
            .unwrap_or_else(|| DailyProgress::new(user.clone(), date, self.plan_day(date))))
    }

    pub fn mark_daily(
        &self,
        user: &UserId,
        date: NaiveDate,
        period: Period,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyProgress> {
        let day_of_year = self.plan_day(date);
        // Only days that have a reading can be marked.
        self.assignment(day_of_year)?;
        Ok(self
            .progress
            .mark_daily(user, date, day_of_year, period, now)?)
    }

    /// Mark the question active during the week of `date`.
    pub fn mark_weekly(
        &self,
        user: &UserId,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyProgress> {
        let current = self.resolve_weekly_item(date)?;
        Ok(self
            .progress
            .mark_weekly(user, current.question_number, date, now)?)
    }

    /// The user's records for `item` within `week`.
    pub fn week_progress(
        &self,
        user: &UserId,
        item: &CurrentItem,
    ) -> Result<Vec<WeeklyProgress>> {
        Ok(self.progress.weekly(
            user,
            item.question_number,
            item.week.start,
            item.week.end,
        )?)
    }
}
