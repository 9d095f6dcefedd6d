use thiserror::Error;

/// Closed error taxonomy surfaced to callers of the scheduling operations.
#[derive(Debug, Error)]
pub enum LectioError {
    /// A corpus or the reading plan is empty; seed before use.
    #[error("Not seeded: {0}")]
    NotSeeded(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0} (expected 'morning' or 'evening')")]
    InvalidPeriod(String),

    /// Request body could not be read.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Opaque persistence failure, propagated unchanged.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LectioError {
    /// Short error code string sent to clients alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            LectioError::NotSeeded(_) => "NOT_SEEDED",
            LectioError::InvalidDate(_) => "INVALID_DATE",
            LectioError::InvalidPeriod(_) => "INVALID_PERIOD",
            LectioError::InvalidRequest(_) => "INVALID_REQUEST",
            LectioError::NotFound(_) => "NOT_FOUND",
            LectioError::Unauthorized(_) => "UNAUTHORIZED",
            LectioError::Storage(_) => "STORAGE_ERROR",
            LectioError::Config(_) => "CONFIG_ERROR",
            LectioError::Serialization(_) => "SERIALIZATION_ERROR",
            LectioError::Io(_) => "IO_ERROR",
            LectioError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, LectioError>;
