//! Domain events for the Turn Coordination context.

use homeward_adjudicator::AdjudicationResponse;
use homeward_core::event::{DomainEvent, EventMetadata};
use homeward_sequence::{Fragment, FragmentId};
use homeward_situation::Situation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scenario::Scenario;
use super::turn::Ending;

/// Emitted once when the game instance is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCreated {
    /// The game identifier.
    pub game_id: Uuid,
    /// Opening content; restart returns to it.
    pub scenario: Scenario,
}

/// Emitted when the player leaves the intro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {
    /// The game identifier.
    pub game_id: Uuid,
}

/// Emitted when a movable fragment is moved within the active sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentReordered {
    /// The fragment that moved.
    pub moving_id: FragmentId,
    /// The fragment it was dropped onto.
    pub target_id: FragmentId,
}

/// Emitted when a candidate is moved within the alternative pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReordered {
    /// The candidate that moved.
    pub moving_id: FragmentId,
    /// The candidate it was dropped onto.
    pub target_id: FragmentId,
}

/// Emitted when the round's one alternative goes into the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeInserted {
    /// The pool candidate inserted.
    pub fragment_id: FragmentId,
    /// Where it was dropped; `None` appends.
    pub target_id: Option<FragmentId>,
}

/// Emitted when an adjudicated round is archived and the next one opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundCompleted {
    /// Number of the round that closed.
    pub round: u32,
    /// The submitted arrangement.
    pub archived: Vec<Fragment>,
    /// The adjudication that closed it.
    pub outcome: AdjudicationResponse,
    /// Situation after the update.
    pub situation: Situation,
}

/// Emitted when an adjudicated round ends the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEnded {
    /// Number of the final round.
    pub round: u32,
    /// The adjudication that closed it.
    pub outcome: AdjudicationResponse,
    /// Situation after the update.
    pub situation: Situation,
    /// How the game ended.
    pub ending: Ending,
}

/// Emitted when an ended game is reset to its opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRestarted {
    /// The game identifier.
    pub game_id: Uuid,
    /// The values the game is reset to.
    pub scenario: Scenario,
}

/// Event type identifier for [`GameCreated`].
pub const GAME_CREATED_EVENT_TYPE: &str = "game.created";

/// Event type identifier for [`GameStarted`].
pub const GAME_STARTED_EVENT_TYPE: &str = "game.started";

/// Event type identifier for [`FragmentReordered`].
pub const FRAGMENT_REORDERED_EVENT_TYPE: &str = "game.fragment_reordered";

/// Event type identifier for [`PoolReordered`].
pub const POOL_REORDERED_EVENT_TYPE: &str = "game.pool_reordered";

/// Event type identifier for [`AlternativeInserted`].
pub const ALTERNATIVE_INSERTED_EVENT_TYPE: &str = "game.alternative_inserted";

/// Event type identifier for [`RoundCompleted`].
pub const ROUND_COMPLETED_EVENT_TYPE: &str = "game.round_completed";

/// Event type identifier for [`GameEnded`].
pub const GAME_ENDED_EVENT_TYPE: &str = "game.ended";

/// Event type identifier for [`GameRestarted`].
pub const GAME_RESTARTED_EVENT_TYPE: &str = "game.restarted";

/// Event payload variants for the Turn Coordination context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// The game was created.
    GameCreated(GameCreated),
    /// The intro was dismissed.
    GameStarted(GameStarted),
    /// A sequence fragment moved.
    FragmentReordered(FragmentReordered),
    /// A pool candidate moved.
    PoolReordered(PoolReordered),
    /// An alternative was inserted.
    AlternativeInserted(AlternativeInserted),
    /// A round was archived and the next opened.
    RoundCompleted(RoundCompleted),
    /// The game ended.
    GameEnded(GameEnded),
    /// The game was reset.
    GameRestarted(GameRestarted),
}

impl GameEventKind {
    /// The stable type identifier of this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GameCreated(_) => GAME_CREATED_EVENT_TYPE,
            Self::GameStarted(_) => GAME_STARTED_EVENT_TYPE,
            Self::FragmentReordered(_) => FRAGMENT_REORDERED_EVENT_TYPE,
            Self::PoolReordered(_) => POOL_REORDERED_EVENT_TYPE,
            Self::AlternativeInserted(_) => ALTERNATIVE_INSERTED_EVENT_TYPE,
            Self::RoundCompleted(_) => ROUND_COMPLETED_EVENT_TYPE,
            Self::GameEnded(_) => GAME_ENDED_EVENT_TYPE,
            Self::GameRestarted(_) => GAME_RESTARTED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Turn Coordination context.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
