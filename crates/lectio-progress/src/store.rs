use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, FixedOffset, NaiveDate};
use lectio_core::types::DATE_FORMAT;
use lectio_core::UserId;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};

use crate::db::init_db;
use crate::error::Result;
use crate::types::{DailyProgress, WeeklyProgress};

/// Persistence collaborator for completion records.
///
/// Upserts merge with whatever is already stored: a flag that is set stays
/// set, and a stored `completed_at` is never overwritten. Concurrent writers
/// for the same key are serialised by the store, not by callers.
pub trait ProgressStore: Send + Sync {
    fn get_daily(&self, user: &UserId, date: NaiveDate) -> Result<Option<DailyProgress>>;

    /// Merge `record` into the stored row and return the result. `now`
    /// stamps `completed_at` if the merge is what completes the day.
    fn upsert_daily(
        &self,
        record: &DailyProgress,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyProgress>;

    /// All of a user's daily records, newest first.
    fn list_daily(&self, user: &UserId) -> Result<Vec<DailyProgress>>;

    /// Records for `item_number` dated within `start..=end`, oldest first.
    fn get_weekly_range(
        &self,
        user: &UserId,
        item_number: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeeklyProgress>>;

    fn upsert_weekly(
        &self,
        record: &WeeklyProgress,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyProgress>;

    /// All of a user's weekly records, newest first.
    fn list_weekly(&self, user: &UserId) -> Result<Vec<WeeklyProgress>>;
}

/// SQLite-backed [`ProgressStore`].
pub struct SqliteProgressStore {
    db: Mutex<Connection>,
}

impl SqliteProgressStore {
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const DAILY_COLUMNS: &str = "SELECT user_id, date, day_of_year, morning_completed,
            evening_completed, completed_at
     FROM daily_progress";

const WEEKLY_COLUMNS: &str = "SELECT user_id, item_number, date, completed, completed_at
     FROM weekly_progress";

impl ProgressStore for SqliteProgressStore {
    #[instrument(skip(self, user), fields(user = %user))]
    fn get_daily(&self, user: &UserId, date: NaiveDate) -> Result<Option<DailyProgress>> {
        let found = self
            .conn()
            .query_row(
                &format!("{DAILY_COLUMNS} WHERE user_id = ?1 AND date = ?2"),
                params![user.as_str(), date.format(DATE_FORMAT).to_string()],
                row_to_daily,
            )
            .optional()?;
        Ok(found)
    }

    #[instrument(skip(self, record), fields(user = %record.user_id, date = %record.date))]
    fn upsert_daily(
        &self,
        record: &DailyProgress,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyProgress> {
        let date = record.date.format(DATE_FORMAT).to_string();
        let now = now.to_rfc3339();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO daily_progress
             (user_id, date, day_of_year, morning_completed, evening_completed,
              completed_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5,
                     CASE WHEN ?4 AND ?5 THEN COALESCE(?6, ?7) END, ?7)
             ON CONFLICT (user_id, date) DO UPDATE SET
                morning_completed = MAX(morning_completed, excluded.morning_completed),
                evening_completed = MAX(evening_completed, excluded.evening_completed),
                completed_at = CASE
                    WHEN MAX(morning_completed, excluded.morning_completed)
                     AND MAX(evening_completed, excluded.evening_completed)
                    THEN COALESCE(completed_at, excluded.completed_at, ?7)
                END,
                updated_at = excluded.updated_at",
            params![
                record.user_id.as_str(),
                date,
                record.day_of_year,
                record.morning_completed,
                record.evening_completed,
                record.completed_at.map(|t| t.to_rfc3339()),
                now,
            ],
        )?;

        // Read back the merged row.
        let merged = conn.query_row(
            &format!("{DAILY_COLUMNS} WHERE user_id = ?1 AND date = ?2"),
            params![record.user_id.as_str(), date],
            row_to_daily,
        )?;
        debug!(state = ?merged.state(), "daily progress stored");
        Ok(merged)
    }

    fn list_daily(&self, user: &UserId) -> Result<Vec<DailyProgress>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("{DAILY_COLUMNS} WHERE user_id = ?1 ORDER BY date DESC"))?;
        let rows = stmt.query_map([user.as_str()], row_to_daily)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    #[instrument(skip(self, user), fields(user = %user))]
    fn get_weekly_range(
        &self,
        user: &UserId,
        item_number: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeeklyProgress>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{WEEKLY_COLUMNS}
             WHERE user_id = ?1 AND item_number = ?2 AND date >= ?3 AND date <= ?4
             ORDER BY date"
        ))?;
        let rows = stmt.query_map(
            params![
                user.as_str(),
                item_number,
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ],
            row_to_weekly,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    #[instrument(skip(self, record), fields(user = %record.user_id, item = record.item_number))]
    fn upsert_weekly(
        &self,
        record: &WeeklyProgress,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyProgress> {
        let date = record.date.format(DATE_FORMAT).to_string();
        let now = now.to_rfc3339();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO weekly_progress
             (user_id, item_number, date, completed, completed_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, CASE WHEN ?4 THEN COALESCE(?5, ?6) END, ?6)
             ON CONFLICT (user_id, item_number, date) DO UPDATE SET
                completed = MAX(completed, excluded.completed),
                completed_at = CASE
                    WHEN MAX(completed, excluded.completed)
                    THEN COALESCE(completed_at, excluded.completed_at, ?6)
                END,
                updated_at = excluded.updated_at",
            params![
                record.user_id.as_str(),
                record.item_number,
                date,
                record.completed,
                record.completed_at.map(|t| t.to_rfc3339()),
                now,
            ],
        )?;

        let merged = conn.query_row(
            &format!("{WEEKLY_COLUMNS} WHERE user_id = ?1 AND item_number = ?2 AND date = ?3"),
            params![record.user_id.as_str(), record.item_number, date],
            row_to_weekly,
        )?;
        debug!(completed = merged.completed, "weekly progress stored");
        Ok(merged)
    }

    fn list_weekly(&self, user: &UserId) -> Result<Vec<WeeklyProgress>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{WEEKLY_COLUMNS} WHERE user_id = ?1 ORDER BY date DESC, item_number"
        ))?;
        let rows = stmt.query_map([user.as_str()], row_to_weekly)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn date_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_col(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<FixedOffset>>> {
    let s: Option<String> = row.get(idx)?;
    s.map(|s| DateTime::parse_from_rfc3339(&s))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_daily(row: &rusqlite::Row<'_>) -> rusqlite::Result<DailyProgress> {
    Ok(DailyProgress {
        user_id: UserId(row.get(0)?),
        date: date_col(row, 1)?,
        day_of_year: row.get(2)?,
        morning_completed: row.get(3)?,
        evening_completed: row.get(4)?,
        completed_at: timestamp_col(row, 5)?,
    })
}

fn row_to_weekly(row: &rusqlite::Row<'_>) -> rusqlite::Result<WeeklyProgress> {
    Ok(WeeklyProgress {
        user_id: UserId(row.get(0)?),
        item_number: row.get(1)?,
        date: date_col(row, 2)?,
        completed: row.get(3)?,
        completed_at: timestamp_col(row, 4)?,
    })
}
