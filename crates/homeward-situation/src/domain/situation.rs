//! The tagged situation and its update rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::severity::SeverityScalar;
use super::stats::{StatDelta, StatVector};

/// Which situation shape a game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationKind {
    /// Five-field stat vector.
    Stats,
    /// Single severity score.
    Severity,
}

impl fmt::Display for SituationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stats => f.write_str("stats"),
            Self::Severity => f.write_str("severity"),
        }
    }
}

/// The game's numeric state. One shape per game, never mixed.
///
/// Serialized untagged so the wire carries the bare shape; the two shapes
/// have disjoint required fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Situation {
    /// Additive stat vector.
    Stats(StatVector),
    /// Replaced-wholesale severity score.
    Severity(SeverityScalar),
}

/// Per-round update returned by the adjudicator.
///
/// Untagged: an object carrying both `severity` and `status_label` is a
/// replacement; any other object is read as a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SituationUpdate {
    /// New severity situation.
    Replace(SeverityScalar),
    /// Stat-vector delta.
    Delta(StatDelta),
}

impl SituationUpdate {
    /// The situation shape this update targets.
    #[must_use]
    pub fn kind(&self) -> SituationKind {
        match self {
            Self::Replace(_) => SituationKind::Severity,
            Self::Delta(_) => SituationKind::Stats,
        }
    }
}

/// Errors raised when an update does not fit the tracked situation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SituationError {
    /// The update targets the other situation shape.
    #[error("{update} update cannot be applied to a {situation} situation")]
    ShapeMismatch {
        /// Shape currently tracked.
        situation: SituationKind,
        /// Shape the update targets.
        update: SituationKind,
    },
}

impl Situation {
    /// Initial value for a game of the given shape.
    #[must_use]
    pub fn initial(kind: SituationKind) -> Self {
        match kind {
            SituationKind::Stats => Self::Stats(StatVector::INITIAL),
            SituationKind::Severity => Self::Severity(SeverityScalar::initial()),
        }
    }

    /// The shape of this situation.
    #[must_use]
    pub fn kind(&self) -> SituationKind {
        match self {
            Self::Stats(_) => SituationKind::Stats,
            Self::Severity(_) => SituationKind::Severity,
        }
    }

    /// Adds a delta to a stat vector.
    ///
    /// # Errors
    ///
    /// Returns `SituationError::ShapeMismatch` on a severity situation.
    pub fn apply_delta(&mut self, delta: &StatDelta) -> Result<(), SituationError> {
        match self {
            Self::Stats(stats) => {
                stats.apply_delta(delta);
                Ok(())
            }
            Self::Severity(_) => Err(SituationError::ShapeMismatch {
                situation: SituationKind::Severity,
                update: SituationKind::Stats,
            }),
        }
    }

    /// Overwrites a severity situation; the previous value is discarded.
    ///
    /// # Errors
    ///
    /// Returns `SituationError::ShapeMismatch` on a stat-vector situation.
    pub fn replace(&mut self, next: SeverityScalar) -> Result<(), SituationError> {
        match self {
            Self::Severity(current) => {
                *current = next;
                Ok(())
            }
            Self::Stats(_) => Err(SituationError::ShapeMismatch {
                situation: SituationKind::Stats,
                update: SituationKind::Severity,
            }),
        }
    }

    /// Applies an adjudicator update according to the situation's shape.
    ///
    /// # Errors
    ///
    /// Returns `SituationError::ShapeMismatch` if the update targets the
    /// other shape; the situation is left unchanged.
    pub fn apply(&mut self, update: &SituationUpdate) -> Result<(), SituationError> {
        match update {
            SituationUpdate::Delta(delta) => self.apply_delta(delta),
            SituationUpdate::Replace(next) => self.replace(next.clone()),
        }
    }

    /// Returns the updated situation without touching `self`.
    ///
    /// # Errors
    ///
    /// Same as [`Situation::apply`].
    pub fn updated(&self, update: &SituationUpdate) -> Result<Self, SituationError> {
        let mut next = self.clone();
        next.apply(update)?;
        Ok(next)
    }

    /// Whether a visible stat is below zero. Always false for severity.
    #[must_use]
    pub fn has_negative_visible(&self) -> bool {
        match self {
            Self::Stats(stats) => stats.has_negative_visible(),
            Self::Severity(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_parses_replacement_when_both_fields_present() {
        let update: SituationUpdate =
            serde_json::from_str(r#"{"severity": 42, "status_label": "心生怀疑"}"#).unwrap();

        assert_eq!(update.kind(), SituationKind::Severity);
    }

    #[test]
    fn test_update_parses_delta_otherwise() {
        let partial: SituationUpdate = serde_json::from_str(r#"{"severity": 42}"#).unwrap();
        let delta: SituationUpdate = serde_json::from_str(r#"{"trust": -3}"#).unwrap();

        assert_eq!(partial.kind(), SituationKind::Stats);
        assert_eq!(delta.kind(), SituationKind::Stats);
    }

    #[test]
    fn test_replace_discards_previous_value() {
        // Arrange
        let mut situation = Situation::initial(SituationKind::Severity);

        // Act
        situation
            .apply(&SituationUpdate::Replace(SeverityScalar::new(80.0, "岌岌可危")))
            .unwrap();

        // Assert
        assert_eq!(
            situation,
            Situation::Severity(SeverityScalar::new(80.0, "岌岌可危"))
        );
    }

    #[test]
    fn test_mismatched_update_is_rejected_and_leaves_state_alone() {
        let mut stats = Situation::initial(SituationKind::Stats);
        let mut severity = Situation::initial(SituationKind::Severity);

        let replace = stats.apply(&SituationUpdate::Replace(SeverityScalar::new(1.0, "x")));
        let delta = severity.apply(&SituationUpdate::Delta(StatDelta::default()));

        assert_eq!(
            replace,
            Err(SituationError::ShapeMismatch {
                situation: SituationKind::Stats,
                update: SituationKind::Severity,
            })
        );
        assert!(delta.is_err());
        assert_eq!(stats, Situation::initial(SituationKind::Stats));
        assert_eq!(severity, Situation::initial(SituationKind::Severity));
    }

    #[test]
    fn test_untagged_round_trip_keeps_shape() {
        let situation = Situation::initial(SituationKind::Stats);

        let json = serde_json::to_value(&situation).unwrap();
        let back: Situation = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(json["trust"], 50.0);
        assert_eq!(back, situation);
    }
}
