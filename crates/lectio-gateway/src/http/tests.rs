use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lectio_catechism::WeeklyRotation;
use lectio_core::{FixedClock, LectioConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app::{build_router, AppState};
use crate::auth::StaticTokens;
use crate::service::tests::open_stores;
use crate::service::Scheduler;

const TOKEN: &str = "token-ana";

fn router_at(now: &str, seed_plan: bool, questions: u32) -> Router {
    let (plan, catechism, progress) = open_stores(seed_plan, questions);
    let scheduler = Scheduler::new(
        plan,
        catechism,
        progress,
        WeeklyRotation::default(),
        NonZeroU32::new(365).unwrap(),
    );
    let mut tokens = BTreeMap::new();
    tokens.insert(TOKEN.to_string(), "ana".to_string());

    let state = AppState::new(
        LectioConfig::default(),
        Arc::new(FixedClock::parse(now).unwrap()),
        Arc::new(StaticTokens::new(&tokens)),
        scheduler,
    );
    build_router(Arc::new(state))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"));
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = router
        .clone()
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_seeded_counts() {
    let router = router_at("2024-03-01T08:00:00-03:00", true, 107);
    let resp = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["plan_days"], 365);
    assert_eq!(body["catechism_questions"], 107);
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let router = router_at("2024-03-01T08:00:00-03:00", true, 107);
    let resp = router
        .oneshot(
            Request::get("/api/readings/today")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn today_includes_readings_and_blank_progress() {
    let router = router_at("2024-03-01T08:00:00-03:00", true, 0);
    let (status, body) = send(&router, "GET", "/api/readings/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-03-01");
    assert_eq!(body["day_of_year"], 61);
    assert_eq!(body["period"], "morning");
    assert_eq!(body["readings"]["day_of_year"], 61);
    assert_eq!(body["progress"]["morning_completed"], false);
    assert_eq!(body["state"], "none");
}

#[tokio::test]
async fn unseeded_plan_is_503() {
    let router = router_at("2024-03-01T08:00:00-03:00", false, 0);
    let (status, body) = send(&router, "GET", "/api/readings/today", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "NOT_SEEDED");
}

#[tokio::test]
async fn explicit_day_lookup() {
    let router = router_at("2024-03-01T08:00:00-03:00", true, 0);
    let (status, body) = send(&router, "GET", "/api/readings/day/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["old_testament_ref"], "Gênesis 1; Gênesis 2");

    let (status, body) = send(&router, "GET", "/api/readings/day/400", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn marking_both_periods_completes_the_day() {
    let router = router_at("2024-03-01T20:00:00-03:00", true, 0);
    let (status, body) = send(
        &router,
        "POST",
        "/api/readings/mark-completed",
        Some(json!({"period": "evening"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evening_completed"], true);
    assert_eq!(body["completed_at"], Value::Null);

    let (_, body) = send(
        &router,
        "POST",
        "/api/readings/mark-completed",
        Some(json!({"period": "morning"})),
    )
    .await;
    assert_eq!(body["morning_completed"], true);
    assert_eq!(body["completed_at"], "2024-03-01T20:00:00-03:00");

    let (_, history) = send(&router, "GET", "/api/progress", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bad_period_and_bad_date_are_400() {
    let router = router_at("2024-03-01T20:00:00-03:00", true, 0);
    let (status, body) = send(
        &router,
        "POST",
        "/api/readings/mark-completed",
        Some(json!({"period": "noon"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");

    let (status, body) = send(
        &router,
        "POST",
        "/api/readings/mark-completed",
        Some(json!({"period": "morning", "date": "01/03/2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE");
}

#[tokio::test]
async fn current_question_and_week_progress() {
    let router = router_at("2024-03-20T10:00:00-03:00", false, 107);
    let (status, body) = send(&router, "GET", "/api/catechism/current", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question_number"], 11);
    assert_eq!(body["total_questions"], 107);
    assert_eq!(body["week_start"], "2024-03-17");
    assert_eq!(body["week_end"], "2024-03-23");
    assert_eq!(body["next_question_date"], "2024-03-24");
    assert_eq!(body["week_progress"], json!([]));

    let (status, body) = send(&router, "POST", "/api/catechism/mark-completed", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_number"], 11);
    assert_eq!(body["date"], "2024-03-20");

    let (_, body) = send(&router, "GET", "/api/catechism/current", None).await;
    assert_eq!(body["week_progress"].as_array().unwrap().len(), 1);

    let (_, history) = send(&router, "GET", "/api/catechism/progress", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn marking_a_past_week_uses_that_weeks_question() {
    let router = router_at("2024-03-20T10:00:00-03:00", false, 107);
    let (status, body) = send(
        &router,
        "POST",
        "/api/catechism/mark-completed",
        Some(json!({"date": "2024-01-10"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_number"], 1);
}

#[tokio::test]
async fn empty_catechism_is_503() {
    let router = router_at("2024-03-20T10:00:00-03:00", false, 0);
    let (status, body) = send(&router, "GET", "/api/catechism/current", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "NOT_SEEDED");
}

#[tokio::test]
async fn unreadable_bodies_get_the_error_shape() {
    let router = router_at("2024-03-01T20:00:00-03:00", true, 107);
    let (status, body) = send(
        &router,
        "POST",
        "/api/readings/mark-completed",
        Some(json!({"date": "2024-03-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    for uri in ["/api/readings/mark-completed", "/api/catechism/mark-completed"] {
        let (status, body) = send(&router, "POST", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "INVALID_REQUEST", "{uri}");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
    }
}
