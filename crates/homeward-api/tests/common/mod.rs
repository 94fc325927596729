//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use homeward_adjudicator::Adjudicator;
use homeward_event_store::InMemoryEventRepository;
use homeward_test_support::FixedClock;
use homeward_turn::domain::phase::GameVariant;
use homeward_turn::domain::scenario::Scenario;
use http_body_util::BodyExt;
use tower::ServiceExt;

use homeward_api::app;
use homeward_api::state::AppState;

/// Build the full app router over a fresh in-memory journal with a game
/// created from the built-in opening of `variant`. Uses the same route
/// structure as `main.rs`.
pub async fn build_test_app(variant: GameVariant, adjudicator: Arc<dyn Adjudicator>) -> Router {
    build_test_app_with_scenario(Scenario::builtin(variant), adjudicator).await
}

/// As [`build_test_app`] with a custom opening.
pub async fn build_test_app_with_scenario(
    scenario: Scenario,
    adjudicator: Arc<dyn Adjudicator>,
) -> Router {
    let app_state = AppState::new(
        Arc::new(FixedClock::default()),
        Arc::new(InMemoryEventRepository::new()),
        adjudicator,
    );
    app_state.initialize(scenario).await.unwrap();
    app(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
