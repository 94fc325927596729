//! Commands for the Turn Coordination context.

use homeward_core::command::Command;
use homeward_sequence::Intent;
use uuid::Uuid;

use super::scenario::Scenario;

/// Command to create the game instance.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier the game will be stored under.
    pub game_id: Uuid,
    /// Opening content.
    pub scenario: Scenario,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "game.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

/// Command to leave the intro and begin round one.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

/// Command to apply a drag-and-drop intent to the active round.
#[derive(Debug, Clone)]
pub struct ApplyIntent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
    /// The player's intent.
    pub intent: Intent,
}

impl Command for ApplyIntent {
    fn command_type(&self) -> &'static str {
        "game.apply_intent"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

/// Command to submit the current arrangement for adjudication.
#[derive(Debug, Clone)]
pub struct SubmitArrangement {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
}

impl Command for SubmitArrangement {
    fn command_type(&self) -> &'static str {
        "game.submit_arrangement"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

/// Command to reset an ended game to its opening.
#[derive(Debug, Clone)]
pub struct RestartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
}

impl Command for RestartGame {
    fn command_type(&self) -> &'static str {
        "game.restart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}
