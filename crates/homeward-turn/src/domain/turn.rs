//! Turn resolution: apply the situation update once, then decide whether
//! the game goes on.

use homeward_adjudicator::{AdjudicationError, AdjudicationResponse, EndingType, Outcome};
use homeward_situation::Situation;
use serde::{Deserialize, Serialize};

/// Who decided that the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingSource {
    /// The adjudicator flagged game over.
    Adjudicator,
    /// A visible stat fell below zero; decided locally.
    LocalSafetyNet,
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    /// Ending classification.
    pub ending_type: EndingType,
    /// Ending narration.
    pub text: String,
    /// Who decided it.
    pub source: EndingSource,
}

impl Ending {
    /// The ending the adjudicator declared.
    #[must_use]
    pub fn declared(outcome: &Outcome) -> Self {
        Self {
            ending_type: outcome.ending_type,
            text: outcome.ending_text.clone(),
            source: EndingSource::Adjudicator,
        }
    }

    /// The fixed local breakdown ending.
    pub fn breakdown(text: impl Into<String>) -> Self {
        Self {
            ending_type: EndingType::Breakdown,
            text: text.into(),
            source: EndingSource::LocalSafetyNet,
        }
    }
}

/// What happens after a round is adjudicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Archive the round and play the next one.
    Continue,
    /// End the game.
    End(Ending),
}

/// Post-update situation plus verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResolution {
    /// The situation after the update was applied exactly once.
    pub situation: Situation,
    /// The termination decision.
    pub verdict: Verdict,
}

/// Resolves one adjudicated round against the current situation.
///
/// The update is applied once and the post-update value is what gets
/// tested. A negative visible stat ends the game with the local breakdown
/// ending whatever the adjudicator said; otherwise the adjudicator's
/// game-over flag decides. A continuing round must bring next-round
/// fragments.
///
/// # Errors
///
/// Returns `AdjudicationError::Situation` if the update has the wrong shape,
/// or `AdjudicationError::Incomplete` if a continuing response carries no
/// next-round fragments.
pub fn resolve_turn(
    current: &Situation,
    response: &AdjudicationResponse,
    breakdown_text: &str,
) -> Result<TurnResolution, AdjudicationError> {
    let situation = current.updated(&response.situation_update)?;

    let verdict = if situation.has_negative_visible() {
        Verdict::End(Ending::breakdown(breakdown_text))
    } else if response.outcome.is_game_over {
        Verdict::End(Ending::declared(&response.outcome))
    } else if response.next_round_fragments.is_empty() {
        return Err(AdjudicationError::Incomplete(
            "continuing round has no next_round_fragments".to_owned(),
        ));
    } else {
        Verdict::Continue
    };

    Ok(TurnResolution { situation, verdict })
}
