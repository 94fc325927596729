//! Homeward API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use homeward_adjudicator::GeminiAdjudicator;
use homeward_api::config::Config;
use homeward_api::state::AppState;
use homeward_api::{app, telemetry};
use homeward_core::clock::SystemClock;
use homeward_event_store::InMemoryEventRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = Config::from_env()?;

    // Initialize tracing subscriber.
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!(variant = ?config.variant, model = %config.gemini.model, "Starting Homeward API server");

    // Build application state and open the game.
    let scenario = config.scenario()?;
    let adjudicator = GeminiAdjudicator::new(config.gemini.clone())?;
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemoryEventRepository::new()),
        Arc::new(adjudicator),
    );
    app_state.initialize(scenario).await?;
    tracing::info!(game_id = %app_state.game_id, "game created");

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the front-end origin once it is hosted.
    let router = app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router).await?;

    if let Some(provider) = tracer_provider {
        provider.shutdown()?;
    }

    Ok(())
}
