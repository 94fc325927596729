//! The engine ↔ adjudicator contract.

use async_trait::async_trait;
use homeward_core::error::DomainError;
use homeward_situation::{Situation, SituationError, SituationUpdate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the engine sends for one submitted round.
///
/// Built from a snapshot taken when the submission starts; later changes to
/// the live game never leak into an in-flight request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicationRequest {
    /// All prior rounds' fragment texts, flattened, oldest first.
    pub history_texts: Vec<String>,
    /// This round's final order, as text only.
    pub submitted_order: Vec<String>,
    /// Current tracker state.
    pub situation: Situation,
}

/// Classification of a game ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingType {
    /// The player was found out.
    Caught,
    /// The parents' trust collapsed entirely.
    TotalDistrust,
    /// No particular ending; also sent while the game continues.
    None,
    /// Local psychological-breakdown ending, raised when a visible stat
    /// drops below zero.
    Breakdown,
    /// Any classification this engine does not know.
    #[serde(other)]
    Other,
}

/// Game-over verdict part of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the adjudicator ends the game.
    pub is_game_over: bool,
    /// Ending classification.
    pub ending_type: EndingType,
    /// Ending narration.
    pub ending_text: String,
}

/// Adjudication result for one round. Every field is required except the
/// alternatives, which only the severity variant uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicationResponse {
    /// Adjudicator-side turn identifier.
    pub turn_id: String,
    /// Game-over verdict.
    pub outcome: Outcome,
    /// Delta (stat variant) or replacement (severity variant).
    #[serde(alias = "new_situation", alias = "delta")]
    pub situation_update: SituationUpdate,
    /// Feedback line shown to the player.
    #[serde(alias = "player_feedback_cn")]
    pub player_feedback_text: String,
    /// Base fragment texts of the next round; the first becomes its anchor.
    #[serde(alias = "next_fragments_cn")]
    pub next_round_fragments: Vec<String>,
    /// Alternative texts of the next round.
    #[serde(default, alias = "alternatives_cn")]
    pub next_round_alternatives: Vec<String>,
}

impl AdjudicationResponse {
    /// Parses a JSON document produced by an adjudicator.
    ///
    /// # Errors
    ///
    /// Returns `AdjudicationError::Malformed` for non-JSON input or a
    /// document missing a required field.
    pub fn from_json_str(text: &str) -> Result<Self, AdjudicationError> {
        serde_json::from_str(text).map_err(|e| AdjudicationError::Malformed(e.to_string()))
    }
}

/// Failures of one adjudication call. All of them are retry-safe.
#[derive(Debug, Error)]
pub enum AdjudicationError {
    /// The adjudicator could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The adjudicator answered with a non-success status.
    #[error("adjudicator returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response is not valid JSON or lacks a required field.
    #[error("malformed adjudication response: {0}")]
    Malformed(String),

    /// The situation update targets the other situation shape.
    #[error("situation update rejected: {0}")]
    Situation(#[from] SituationError),

    /// The response parsed but cannot drive the next round.
    #[error("incomplete adjudication response: {0}")]
    Incomplete(String),
}

impl From<AdjudicationError> for DomainError {
    fn from(err: AdjudicationError) -> Self {
        Self::Adjudication(err.to_string())
    }
}

/// Port to the external adjudicator.
///
/// The engine enforces no timeout and never retries; an implementation that
/// needs either owns it.
#[async_trait]
pub trait Adjudicator: Send + Sync {
    /// Adjudicates one submitted round.
    async fn adjudicate(
        &self,
        request: &AdjudicationRequest,
    ) -> Result<AdjudicationResponse, AdjudicationError>;
}
