//! Routes for the single game instance.

use std::sync::Arc;

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use homeward_sequence::Intent;
use homeward_turn::application::command_handlers::{self, SubmitOutcome};
use homeward_turn::application::query_handlers::{self, GameView};
use homeward_turn::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /submit.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// `continued`, `ended` or `ignored`.
    pub status: &'static str,
    /// Why an ignored submission was not sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// The game after the submission.
    pub view: GameView,
}

async fn current_view(state: &AppState) -> Result<GameView, ApiError> {
    let view = query_handlers::get_game_by_id(
        state.game_id,
        &*state.event_repository,
        state.latch.is_active(),
    )
    .await?;
    Ok(view)
}

/// GET /
async fn get_game(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    Ok(Json(current_view(&state).await?))
}

/// POST /start
#[instrument(skip(state), fields(game_id = %state.game_id))]
async fn start_game(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    let command = commands::StartGame {
        correlation_id: Uuid::new_v4(),
        game_id: state.game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_game command");

    command_handlers::handle_start_game(&command, state.clock.as_ref(), &*state.event_repository)
        .await?;

    Ok(Json(current_view(&state).await?))
}

/// POST /intents
#[instrument(skip(state, intent), fields(game_id = %state.game_id, intent = intent.kind()))]
async fn apply_intent(
    State(state): State<AppState>,
    Json(intent): Json<Intent>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::ApplyIntent {
        correlation_id: Uuid::new_v4(),
        game_id: state.game_id,
        intent,
    };

    command_handlers::handle_apply_intent(&command, state.clock.as_ref(), &*state.event_repository)
        .await?;

    Ok(Json(current_view(&state).await?))
}

/// POST /submit
#[instrument(skip(state), fields(game_id = %state.game_id))]
async fn submit(State(state): State<AppState>) -> Result<Json<SubmitResponse>, ApiError> {
    let command = commands::SubmitArrangement {
        correlation_id: Uuid::new_v4(),
        game_id: state.game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_arrangement command");

    let result = command_handlers::handle_submit_arrangement_detached(
        command,
        state.clock.clone(),
        Arc::clone(&state.event_repository),
        Arc::clone(&state.adjudicator),
        state.latch.clone(),
    )
    .await?;

    let (status, reason) = match result.outcome {
        SubmitOutcome::Continued { .. } => ("continued", None),
        SubmitOutcome::Ended { .. } => ("ended", None),
        SubmitOutcome::Ignored { reason } => ("ignored", Some(reason.as_str())),
    };

    Ok(Json(SubmitResponse {
        status,
        reason,
        view: current_view(&state).await?,
    }))
}

/// POST /restart
#[instrument(skip(state), fields(game_id = %state.game_id))]
async fn restart_game(State(state): State<AppState>) -> Result<Json<GameView>, ApiError> {
    let command = commands::RestartGame {
        correlation_id: Uuid::new_v4(),
        game_id: state.game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling restart_game command");

    command_handlers::handle_restart_game(&command, state.clock.as_ref(), &*state.event_repository)
        .await?;

    Ok(Json(current_view(&state).await?))
}

/// Returns the router for the game.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_game))
        .route("/start", post(start_game))
        .route("/intents", post(apply_intent))
        .route("/submit", post(submit))
        .route("/restart", post(restart_game))
}
