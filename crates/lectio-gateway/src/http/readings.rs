//! Daily readings: `/api/readings/*`.
//!
//! `mark-completed` accepts `{"period": "morning" | "evening", "date"?: "YYYY-MM-DD"}`;
//! the date defaults to today in the configured zone.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use lectio_core::types::parse_date;
use lectio_plan::Assignment;
use lectio_progress::{CompletionState, DailyProgress, Period};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::authenticate;
use crate::http::error::{api_error, body_error, ApiResult};
use crate::service::DayPeriod;

#[derive(Serialize)]
pub struct TodayResponse {
    pub date: chrono::NaiveDate,
    pub day_of_year: u32,
    /// Suggested half of the reading for the current hour.
    pub period: DayPeriod,
    pub readings: Assignment,
    pub progress: DailyProgress,
    pub state: CompletionState,
}

#[derive(Deserialize)]
pub struct MarkDailyRequest {
    pub period: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// GET /api/readings/today
pub async fn today(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<TodayResponse> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let now = state.clock.now();

    let today = state.scheduler.resolve_today(now).map_err(api_error)?;
    let progress = state
        .scheduler
        .daily_progress(&user, today.date)
        .map_err(api_error)?;

    Ok(Json(TodayResponse {
        date: today.date,
        day_of_year: today.day_of_year,
        period: today.period,
        readings: today.readings,
        state: progress.state(),
        progress,
    }))
}

/// GET /api/readings/day/{day}
pub async fn by_day(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(day): Path<u32>,
) -> ApiResult<Assignment> {
    authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let assignment = state.scheduler.assignment(day).map_err(api_error)?;
    Ok(Json(assignment))
}

/// POST /api/readings/mark-completed
pub async fn mark_completed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<MarkDailyRequest>, JsonRejection>,
) -> ApiResult<DailyProgress> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let Json(req) = body.map_err(body_error)?;
    let period: Period = req.period.parse().map_err(api_error)?;

    let now = state.clock.now();
    let date = match req.date.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s).map_err(api_error)?,
        None => now.date_naive(),
    };

    let progress = state
        .scheduler
        .mark_daily(&user, date, period, now)
        .map_err(api_error)?;
    Ok(Json(progress))
}
