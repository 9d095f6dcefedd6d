use lectio_core::LectioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Period other than `morning` / `evening`.
    #[error("invalid period {0:?}, expected \"morning\" or \"evening\"")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

impl From<ProgressError> for LectioError {
    fn from(e: ProgressError) -> Self {
        match e {
            ProgressError::Database(e) => LectioError::Storage(e.to_string()),
            ProgressError::InvalidPeriod(p) => LectioError::InvalidPeriod(format!("{p:?}")),
        }
    }
}
