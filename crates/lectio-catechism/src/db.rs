use rusqlite::Connection;

use crate::error::Result;

/// Initialise the catechism schema in `conn`. Idempotent.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS westminster_catechism (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            question_number INTEGER NOT NULL UNIQUE CHECK (question_number > 0),
            question_text   TEXT    NOT NULL,
            answer_text     TEXT    NOT NULL,
            updated_at      TEXT    NOT NULL
        ) STRICT;
        ",
    )?;
    Ok(())
}
