use lectio_core::LectioError;
use thiserror::Error;

/// Errors that can occur while building, storing, or reading a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A corpus sub-unit was declared with zero items.
    #[error("Corpus sub-unit {name:?} has no items")]
    EmptyUnit { name: String },

    /// Day outside `1..=plan_days`.
    #[error("Day {day} is outside the plan (1..={plan_days})")]
    DayOutOfRange { day: u32, plan_days: u32 },

    /// No plan has been seeded yet.
    #[error("Reading plan is empty")]
    NotSeeded,
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl From<PlanError> for LectioError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Database(e) => LectioError::Storage(e.to_string()),
            PlanError::EmptyUnit { .. } => LectioError::Internal(e.to_string()),
            PlanError::DayOutOfRange { .. } => LectioError::NotFound(e.to_string()),
            PlanError::NotSeeded => {
                LectioError::NotSeeded("reading plan is empty; run `seed-plan` first".to_string())
            }
        }
    }
}
