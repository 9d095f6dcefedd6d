use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, instrument};

use crate::db::init_db;
use crate::error::Result;
use crate::types::Assignment;

/// Persistence collaborator for plan assignments, keyed by `day_of_year`.
pub trait PlanStore: Send + Sync {
    fn get(&self, day_of_year: u32) -> Result<Option<Assignment>>;

    /// Insert, or overwrite every reference of an existing day.
    fn upsert(&self, assignment: &Assignment) -> Result<()>;

    fn count(&self) -> Result<u32>;

    /// All assignments ordered by day.
    fn list(&self) -> Result<Vec<Assignment>>;

    /// Delete every assignment. Returns the number of rows removed.
    fn clear(&self) -> Result<usize>;
}

/// SQLite-backed [`PlanStore`].
pub struct SqlitePlanStore {
    db: Mutex<Connection>,
}

impl SqlitePlanStore {
    /// Wrap `conn`, creating the schema if needed.
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

const SELECT_COLUMNS: &str =
    "SELECT day_of_year, old_testament_ref, new_testament_ref, psalms_ref, proverbs_ref
     FROM reading_plans";

impl PlanStore for SqlitePlanStore {
    #[instrument(skip(self))]
    fn get(&self, day_of_year: u32) -> Result<Option<Assignment>> {
        let conn = self.conn();
        let found = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE day_of_year = ?1"),
                [day_of_year],
                row_to_assignment,
            )
            .optional()?;
        debug!(hit = found.is_some(), "assignment lookup");
        Ok(found)
    }

    #[instrument(skip(self, assignment), fields(day = assignment.day_of_year))]
    fn upsert(&self, assignment: &Assignment) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO reading_plans
             (day_of_year, old_testament_ref, new_testament_ref, psalms_ref, proverbs_ref, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (day_of_year) DO UPDATE SET
                old_testament_ref = excluded.old_testament_ref,
                new_testament_ref = excluded.new_testament_ref,
                psalms_ref        = excluded.psalms_ref,
                proverbs_ref      = excluded.proverbs_ref,
                updated_at        = excluded.updated_at",
            params![
                assignment.day_of_year,
                assignment.old_testament_ref,
                assignment.new_testament_ref,
                assignment.psalms_ref,
                assignment.proverbs_ref,
                now,
            ],
        )?;
        Ok(())
    }

    fn count(&self) -> Result<u32> {
        let n = self
            .conn()
            .query_row("SELECT COUNT(*) FROM reading_plans", [], |row| row.get(0))?;
        Ok(n)
    }

    fn list(&self) -> Result<Vec<Assignment>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY day_of_year"))?;
        let rows = stmt.query_map([], row_to_assignment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn clear(&self) -> Result<usize> {
        let n = self.conn().execute("DELETE FROM reading_plans", [])?;
        info!(rows = n, "reading plan cleared");
        Ok(n)
    }
}

fn row_to_assignment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        day_of_year: row.get(0)?,
        old_testament_ref: row.get(1)?,
        new_testament_ref: row.get(2)?,
        psalms_ref: row.get(3)?,
        proverbs_ref: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqlitePlanStore {
        SqlitePlanStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn day(n: u32, ot: &str) -> Assignment {
        Assignment {
            day_of_year: n,
            old_testament_ref: ot.to_string(),
            new_testament_ref: String::new(),
            psalms_ref: format!("Salmos {n}"),
            proverbs_ref: format!("Provérbios {n}"),
        }
    }

    #[test]
    fn missing_day_is_absent_not_an_error() {
        let s = store();
        assert_eq!(s.get(1).unwrap(), None);
        assert_eq!(s.count().unwrap(), 0);
    }

    #[test]
    fn upsert_overwrites_by_day() {
        let s = store();
        s.upsert(&day(1, "Gênesis 1")).unwrap();
        s.upsert(&day(1, "Gênesis 1; Gênesis 2")).unwrap();
        assert_eq!(s.count().unwrap(), 1);
        let got = s.get(1).unwrap().unwrap();
        assert_eq!(got.old_testament_ref, "Gênesis 1; Gênesis 2");
        assert_eq!(got.new_testament_ref, "");
    }

    #[test]
    fn list_is_ordered_and_clear_empties() {
        let s = store();
        for n in [3, 1, 2] {
            s.upsert(&day(n, "x")).unwrap();
        }
        let days: Vec<u32> = s.list().unwrap().iter().map(|a| a.day_of_year).collect();
        assert_eq!(days, [1, 2, 3]);
        assert_eq!(s.clear().unwrap(), 3);
        assert!(s.list().unwrap().is_empty());
    }
}
