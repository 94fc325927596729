//! Game phase state machine and game variants.
//!
//! ```text
//! Intro --start--> Playing --(turn resolution)--> Ended --restart--> Intro
//! ```
//!
//! Stat-vector games skip `Intro`: they are created in `Playing` and
//! restart back into `Playing`.

use serde::{Deserialize, Serialize};

use homeward_situation::SituationKind;

/// Process-wide phase of the single game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Introduction shown; nothing can be arranged yet.
    Intro,
    /// Rounds are being played.
    Playing,
    /// The game is over; only restart is accepted.
    Ended,
}

impl GamePhase {
    /// Whether the player may start the game from this phase.
    #[must_use]
    pub fn can_start(self) -> bool {
        self == Self::Intro
    }

    /// Whether sequence and pool intents are accepted.
    #[must_use]
    pub fn accepts_intents(self) -> bool {
        self == Self::Playing
    }

    /// Whether a restart is accepted.
    #[must_use]
    pub fn can_restart(self) -> bool {
        self == Self::Ended
    }
}

/// The rule set a game is created with. Chosen once, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    /// Stat vector with additive deltas and a local collapse check; no
    /// intro, no alternatives.
    Stats,
    /// Severity score replaced each round; intro phase and one mandatory
    /// alternative insertion per round.
    Severity,
}

impl GameVariant {
    /// The situation shape this variant tracks.
    #[must_use]
    pub fn situation_kind(self) -> SituationKind {
        match self {
            Self::Stats => SituationKind::Stats,
            Self::Severity => SituationKind::Severity,
        }
    }

    /// Phase a fresh or restarted game begins in.
    #[must_use]
    pub fn initial_phase(self) -> GamePhase {
        match self {
            Self::Stats => GamePhase::Playing,
            Self::Severity => GamePhase::Intro,
        }
    }

    /// Whether rounds come with an alternative pool.
    #[must_use]
    pub fn offers_alternatives(self) -> bool {
        self == Self::Severity
    }
}

impl std::str::FromStr for GameVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stats" => Ok(Self::Stats),
            "severity" => Ok(Self::Severity),
            other => Err(format!("unknown game variant: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_intro_can_start_and_only_ended_can_restart() {
        assert!(GamePhase::Intro.can_start());
        assert!(!GamePhase::Playing.can_start());
        assert!(!GamePhase::Ended.can_start());

        assert!(GamePhase::Ended.can_restart());
        assert!(!GamePhase::Intro.can_restart());
        assert!(!GamePhase::Playing.can_restart());
    }

    #[test]
    fn test_only_playing_accepts_intents() {
        assert!(GamePhase::Playing.accepts_intents());
        assert!(!GamePhase::Intro.accepts_intents());
        assert!(!GamePhase::Ended.accepts_intents());
    }

    #[test]
    fn test_variant_parsing_and_initial_phase() {
        assert_eq!("Stats".parse::<GameVariant>(), Ok(GameVariant::Stats));
        assert_eq!(" severity ".parse::<GameVariant>(), Ok(GameVariant::Severity));
        assert!("both".parse::<GameVariant>().is_err());

        assert_eq!(GameVariant::Stats.initial_phase(), GamePhase::Playing);
        assert_eq!(GameVariant::Severity.initial_phase(), GamePhase::Intro);
    }
}
