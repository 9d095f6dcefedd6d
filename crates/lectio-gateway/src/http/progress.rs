use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use lectio_progress::{DailyProgress, WeeklyProgress};

use crate::app::AppState;
use crate::auth::authenticate;
use crate::http::error::{api_error, ApiResult};

/// GET /api/progress: daily records, newest first.
pub async fn daily_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<DailyProgress>> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let records = state
        .scheduler
        .progress()
        .daily_history(&user)
        .map_err(api_error)?;
    Ok(Json(records))
}

/// GET /api/catechism/progress: weekly records, newest first.
pub async fn weekly_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<WeeklyProgress>> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let records = state
        .scheduler
        .progress()
        .weekly_history(&user)
        .map_err(api_error)?;
    Ok(Json(records))
}
