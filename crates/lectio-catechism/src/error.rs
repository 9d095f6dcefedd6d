use lectio_core::LectioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatechismError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The corpus has no items; the rotation is undefined.
    #[error("catechism is empty")]
    NotSeeded,

    #[error("question {number} not found")]
    NotFound { number: u32 },

    #[error("invalid catechism source: {0}")]
    InvalidSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatechismError>;

impl From<CatechismError> for LectioError {
    fn from(e: CatechismError) -> Self {
        match e {
            CatechismError::Database(e) => LectioError::Storage(e.to_string()),
            CatechismError::NotSeeded => LectioError::NotSeeded(
                "catechism is empty; run `seed-catechism` first".to_string(),
            ),
            CatechismError::NotFound { .. } => LectioError::NotFound(e.to_string()),
            CatechismError::InvalidSource(msg) => LectioError::Internal(msg),
            CatechismError::Io(e) => LectioError::Io(e),
        }
    }
}
