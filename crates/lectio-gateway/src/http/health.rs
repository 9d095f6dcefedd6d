use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health: liveness probe plus how much content is seeded.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "plan_days": state.scheduler.plan_count().ok(),
        "catechism_questions": state.scheduler.catechism_count().ok(),
        "utc_offset_minutes": state.config.schedule.utc_offset_minutes,
    }))
}
