//! Homeward API server library.
//!
//! The HTTP surface is the rendering boundary: it reads the game view and
//! forwards player actions to the turn coordinator.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

/// Builds the application router without transport layers.
pub fn app(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .with_state(app_state)
}
