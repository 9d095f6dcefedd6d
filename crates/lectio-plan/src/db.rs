use rusqlite::Connection;

use crate::error::Result;

/// Initialise the plan schema in `conn`. Idempotent.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reading_plans (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            day_of_year         INTEGER NOT NULL UNIQUE,
            old_testament_ref   TEXT    NOT NULL DEFAULT '',
            new_testament_ref   TEXT    NOT NULL DEFAULT '',
            psalms_ref          TEXT    NOT NULL DEFAULT '',
            proverbs_ref        TEXT    NOT NULL DEFAULT '',
            updated_at          TEXT    NOT NULL
        ) STRICT;
        ",
    )?;
    Ok(())
}
