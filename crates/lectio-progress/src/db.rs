use rusqlite::Connection;

use crate::error::Result;

/// Initialise the completion tables in `conn`. Idempotent.
///
/// Dates are stored as `YYYY-MM-DD` text so range scans compare
/// lexicographically; timestamps are RFC 3339.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS daily_progress (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id             TEXT    NOT NULL,
            date                TEXT    NOT NULL,
            day_of_year         INTEGER NOT NULL,
            morning_completed   INTEGER NOT NULL DEFAULT 0,
            evening_completed   INTEGER NOT NULL DEFAULT 0,
            completed_at        TEXT,
            updated_at          TEXT    NOT NULL,
            UNIQUE (user_id, date)
        ) STRICT;

        CREATE INDEX IF NOT EXISTS idx_daily_progress_user
            ON daily_progress(user_id, date DESC);

        CREATE TABLE IF NOT EXISTS weekly_progress (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT    NOT NULL,
            item_number     INTEGER NOT NULL,
            date            TEXT    NOT NULL,
            completed       INTEGER NOT NULL DEFAULT 0,
            completed_at    TEXT,
            updated_at      TEXT    NOT NULL,
            UNIQUE (user_id, item_number, date)
        ) STRICT;

        CREATE INDEX IF NOT EXISTS idx_weekly_progress_user
            ON weekly_progress(user_id, date DESC);
        ",
    )?;
    Ok(())
}
