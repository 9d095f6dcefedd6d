//! Weekly question: `/api/catechism/*`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use chrono::NaiveDate;
use lectio_catechism::WeeklyItem;
use lectio_core::types::parse_date;
use lectio_progress::WeeklyProgress;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::AppState;
use crate::auth::authenticate;
use crate::http::error::{api_error, body_error, ApiResult};

#[derive(Serialize)]
pub struct CurrentQuestionResponse {
    pub question: WeeklyItem,
    pub question_number: u32,
    pub total_questions: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub next_question_date: NaiveDate,
    /// This user's completion records for the question, this week.
    pub week_progress: Vec<WeeklyProgress>,
}

#[derive(Deserialize, Default)]
pub struct MarkWeeklyRequest {
    #[serde(default)]
    pub date: Option<String>,
}

/// GET /api/catechism/current
pub async fn current(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<CurrentQuestionResponse> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let now = state.clock.now();

    let item = state
        .scheduler
        .resolve_current_weekly_item(now)
        .map_err(api_error)?;

    // The question is still useful without the user's records.
    let week_progress = state
        .scheduler
        .week_progress(&user, &item)
        .unwrap_or_else(|e| {
            warn!(user = %user, error = %e, "failed to load week progress");
            Vec::new()
        });

    Ok(Json(CurrentQuestionResponse {
        question_number: item.question_number,
        total_questions: item.total_questions,
        week_start: item.week.start,
        week_end: item.week.end,
        next_question_date: item.week.next_rotation,
        question: item.question,
        week_progress,
    }))
}

/// POST /api/catechism/mark-completed: `{"date"?: "YYYY-MM-DD"}`.
///
/// Marks the question active during the week of `date` (default today).
pub async fn mark_completed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<MarkWeeklyRequest>, JsonRejection>,
) -> ApiResult<WeeklyProgress> {
    let user = authenticate(state.identity.as_ref(), &headers).map_err(api_error)?;
    let Json(req) = body.map_err(body_error)?;
    let now = state.clock.now();
    let date = match req.date.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s).map_err(api_error)?,
        None => now.date_naive(),
    };

    let record = state
        .scheduler
        .mark_weekly(&user, date, now)
        .map_err(api_error)?;
    Ok(Json(record))
}
