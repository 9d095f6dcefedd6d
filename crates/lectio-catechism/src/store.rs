use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, instrument};

use crate::db::init_db;
use crate::error::Result;
use crate::types::WeeklyItem;

/// Persistence collaborator for the rotating corpus, keyed by question number.
pub trait CatechismStore: Send + Sync {
    /// Number of stored items. This is the rotation's cycle length.
    fn count(&self) -> Result<u32>;

    fn get(&self, question_number: u32) -> Result<Option<WeeklyItem>>;

    /// The `ordinal`-th stored item (1-based) in question-number order.
    /// Numbering gaps are skipped, so ordinals `1..=count()` always resolve.
    fn nth(&self, ordinal: u32) -> Result<Option<WeeklyItem>>;

    /// Insert, or replace the texts of an existing question.
    fn upsert(&self, item: &WeeklyItem) -> Result<()>;

    /// All items ordered by question number.
    fn list(&self) -> Result<Vec<WeeklyItem>>;

    /// Delete every item. Returns the number of rows removed.
    fn clear(&self) -> Result<usize>;
}

/// SQLite-backed [`CatechismStore`].
pub struct SqliteCatechismStore {
    db: Mutex<Connection>,
}

impl SqliteCatechismStore {
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

impl CatechismStore for SqliteCatechismStore {
    fn count(&self) -> Result<u32> {
        // COUNT, not MAX(question_number): the cycle length is the number of
        // stored items.
        let n = self.conn().query_row(
            "SELECT COUNT(*) FROM westminster_catechism",
            [],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    #[instrument(skip(self))]
    fn get(&self, question_number: u32) -> Result<Option<WeeklyItem>> {
        let found = self
            .conn()
            .query_row(
                "SELECT question_number, question_text, answer_text
                 FROM westminster_catechism WHERE question_number = ?1",
                [question_number],
                row_to_item,
            )
            .optional()?;
        debug!(hit = found.is_some(), "catechism lookup");
        Ok(found)
    }

    #[instrument(skip(self))]
    fn nth(&self, ordinal: u32) -> Result<Option<WeeklyItem>> {
        let Some(offset) = ordinal.checked_sub(1) else {
            return Ok(None);
        };
        let found = self
            .conn()
            .query_row(
                "SELECT question_number, question_text, answer_text
                 FROM westminster_catechism
                 ORDER BY question_number LIMIT 1 OFFSET ?1",
                [offset],
                row_to_item,
            )
            .optional()?;
        debug!(hit = found.is_some(), "catechism ordinal lookup");
        Ok(found)
    }

    #[instrument(skip(self, item), fields(number = item.question_number))]
    fn upsert(&self, item: &WeeklyItem) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO westminster_catechism
             (question_number, question_text, answer_text, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (question_number) DO UPDATE SET
                question_text = excluded.question_text,
                answer_text   = excluded.answer_text,
                updated_at    = excluded.updated_at",
            params![item.question_number, item.question_text, item.answer_text, now],
        )?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<WeeklyItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT question_number, question_text, answer_text
             FROM westminster_catechism ORDER BY question_number",
        )?;
        let rows = stmt.query_map([], row_to_item)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn clear(&self) -> Result<usize> {
        let n = self.conn().execute("DELETE FROM westminster_catechism", [])?;
        info!(rows = n, "catechism cleared");
        Ok(n)
    }
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<WeeklyItem> {
    Ok(WeeklyItem {
        question_number: row.get(0)?,
        question_text: row.get(1)?,
        answer_text: row.get(2)?,
    })
}
