//! Query handlers for the Turn Coordination context.
//!
//! Reconstitutes the game from its events and returns the read-only view
//! the rendering boundary draws from.

use homeward_core::error::DomainError;
use homeward_core::repository::EventRepository;
use homeward_sequence::Fragment;
use homeward_situation::{Situation, VisibleStats};
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::GameSession;
use crate::domain::history::HistoryItem;
use crate::domain::phase::{GamePhase, GameVariant};
use crate::domain::turn::Ending;

/// Read-only view of the game.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Rule set.
    pub variant: GameVariant,
    /// Current phase.
    pub phase: GamePhase,
    /// Number of the active round.
    pub round: u32,
    /// Raw situation.
    pub situation: Situation,
    /// Severity clamped to [0, 100] for display (severity games only).
    pub display_severity: Option<f64>,
    /// The active sequence, in order.
    pub sequence: Vec<Fragment>,
    /// Remaining alternatives.
    pub pool: Vec<Fragment>,
    /// Whether this round's alternative has been inserted.
    pub has_added_alternative: bool,
    /// Whether a submission would be sent right now.
    pub can_submit: bool,
    /// Whether a submission is awaiting adjudication.
    pub submitting: bool,
    /// Current feedback line.
    pub feedback: String,
    /// Archived rounds.
    pub history: Vec<HistoryItem>,
    /// How the game ended, once it has.
    pub ending: Option<Ending>,
    /// Rounded visible stats for the ending summary (ended stat games only).
    pub final_stats: Option<VisibleStats>,
    /// Current version (event count).
    pub version: i64,
}

impl GameView {
    /// Builds the view of `session`.
    #[must_use]
    pub fn from_session(session: &GameSession, submitting: bool) -> Self {
        let display_severity = match session.situation() {
            Situation::Severity(scalar) => Some(scalar.display_severity()),
            Situation::Stats(_) => None,
        };
        let final_stats = match (session.phase(), session.situation()) {
            (GamePhase::Ended, Situation::Stats(stats)) => Some(stats.visible_rounded()),
            _ => None,
        };
        let round = session.round();
        Self {
            game_id: session.id,
            variant: session.variant(),
            phase: session.phase(),
            round: round.number(),
            situation: session.situation().clone(),
            display_severity,
            sequence: round.sequence().fragments().to_vec(),
            pool: round.pool().fragments().to_vec(),
            has_added_alternative: round.has_added_alternative(),
            can_submit: !submitting && session.prepare_submission().is_ok(),
            submitting,
            feedback: session.feedback().to_owned(),
            history: session.history().items().to_vec(),
            ending: session.ending().cloned(),
            final_stats,
            version: session.version,
        }
    }
}

/// Retrieves the game by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn EventRepository,
    submitting: bool,
) -> Result<GameView, DomainError> {
    let stored_events = repo.load_events(game_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    let session = command_handlers::reconstitute(game_id, &stored_events)?;
    Ok(GameView::from_session(&session, submitting))
}
