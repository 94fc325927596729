//! Shared application state.

use std::fmt;
use std::sync::Arc;

use homeward_adjudicator::Adjudicator;
use homeward_core::clock::Clock;
use homeward_core::error::DomainError;
use homeward_core::repository::EventRepository;
use homeward_turn::application::command_handlers;
use homeward_turn::application::in_flight::SubmissionLatch;
use homeward_turn::domain::commands::CreateGame;
use homeward_turn::domain::scenario::Scenario;
use uuid::Uuid;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single game this process serves.
    pub game_id: Uuid,
    /// Clock for event timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Event journal.
    pub event_repository: Arc<dyn EventRepository>,
    /// Adjudicator port.
    pub adjudicator: Arc<dyn Adjudicator>,
    /// The "submitting" flag.
    pub latch: SubmissionLatch,
}

impl AppState {
    /// Create new application state for a fresh game id.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        event_repository: Arc<dyn EventRepository>,
        adjudicator: Arc<dyn Adjudicator>,
    ) -> Self {
        Self {
            game_id: Uuid::now_v7(),
            clock,
            event_repository,
            adjudicator,
            latch: SubmissionLatch::new(),
        }
    }

    /// Creates the game from `scenario`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game already exists or the
    /// scenario is unusable, or the repository's error if appending fails.
    pub async fn initialize(&self, scenario: Scenario) -> Result<(), DomainError> {
        let command = CreateGame {
            correlation_id: Uuid::new_v4(),
            game_id: self.game_id,
            scenario,
        };
        command_handlers::handle_create_game(
            &command,
            self.clock.as_ref(),
            &*self.event_repository,
        )
        .await?;
        Ok(())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("game_id", &self.game_id)
            .field("latch", &self.latch)
            .finish_non_exhaustive()
    }
}
