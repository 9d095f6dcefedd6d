use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use lectio_core::LectioError;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn status_for(e: &LectioError) -> StatusCode {
    match e {
        LectioError::NotSeeded(_) => StatusCode::SERVICE_UNAVAILABLE,
        LectioError::InvalidDate(_)
        | LectioError::InvalidPeriod(_)
        | LectioError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        LectioError::NotFound(_) => StatusCode::NOT_FOUND,
        LectioError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        LectioError::Storage(_)
        | LectioError::Config(_)
        | LectioError::Serialization(_)
        | LectioError::Io(_)
        | LectioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Malformed or missing JSON bodies get the same error shape as everything else.
pub fn body_error(rejection: JsonRejection) -> ApiError {
    api_error(LectioError::InvalidRequest(rejection.body_text()))
}

/// Map a service error onto a status code and a `{"error", "code"}` body.
pub fn api_error(e: impl Into<LectioError>) -> ApiError {
    let e = e.into();
    let status = status_for(&e);
    if status.is_server_error() {
        error!(code = e.code(), error = %e, "request failed");
    } else {
        warn!(code = e.code(), error = %e, "request rejected");
    }
    (
        status,
        Json(ErrorBody {
            error: e.to_string(),
            code: e.code(),
        }),
    )
}
