use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use lectio_core::{Clock, LectioConfig};

use crate::auth::IdentityResolver;
use crate::service::Scheduler;

/// Central shared state, passed as `Arc<AppState>` to all Axum handlers.
pub struct AppState {
    pub config: LectioConfig,
    pub clock: Arc<dyn Clock>,
    pub identity: Arc<dyn IdentityResolver>,
    pub scheduler: Scheduler,
}

impl AppState {
    pub fn new(
        config: LectioConfig,
        clock: Arc<dyn Clock>,
        identity: Arc<dyn IdentityResolver>,
        scheduler: Scheduler,
    ) -> Self {
        Self {
            config,
            clock,
            identity,
            scheduler,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    use crate::http::{catechism, health, progress, readings};

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/readings/today", get(readings::today))
        .route("/api/readings/day/{day}", get(readings::by_day))
        .route("/api/readings/mark-completed", post(readings::mark_completed))
        .route("/api/progress", get(progress::daily_history))
        .route("/api/catechism/current", get(catechism::current))
        .route("/api/catechism/mark-completed", post(catechism::mark_completed))
        .route("/api/catechism/progress", get(progress::weekly_history))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
