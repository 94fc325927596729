//! Stat-vector situation.

use serde::{Deserialize, Serialize};

/// Five independent scalars, nominally in `[0, 100]`.
///
/// `trust`, `autonomy` and `study` are shown to the player; `risk` and
/// `coherence` stay hidden. Values are raw accumulators: they are never
/// clamped, so a visible field below zero stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatVector {
    /// Parents' trust.
    pub trust: f64,
    /// Sense of autonomy.
    pub autonomy: f64,
    /// Academic standing.
    pub study: f64,
    /// Hidden exposure risk.
    pub risk: f64,
    /// Hidden narrative coherence.
    pub coherence: f64,
}

impl StatVector {
    /// Starting values of a new stat-vector game.
    pub const INITIAL: Self = Self {
        trust: 50.0,
        autonomy: 50.0,
        study: 50.0,
        risk: 30.0,
        coherence: 100.0,
    };

    /// Adds `delta` field by field; absent fields change nothing.
    pub fn apply_delta(&mut self, delta: &StatDelta) {
        self.trust += delta.trust.unwrap_or(0.0);
        self.autonomy += delta.autonomy.unwrap_or(0.0);
        self.study += delta.study.unwrap_or(0.0);
        self.risk += delta.risk.unwrap_or(0.0);
        self.coherence += delta.coherence.unwrap_or(0.0);
    }

    /// Whether any visible field has dropped below zero.
    #[must_use]
    pub fn has_negative_visible(&self) -> bool {
        self.trust < 0.0 || self.autonomy < 0.0 || self.study < 0.0
    }

    /// Visible fields rounded to whole numbers for the ending summary.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn visible_rounded(&self) -> VisibleStats {
        VisibleStats {
            trust: self.trust.round() as i64,
            autonomy: self.autonomy.round() as i64,
            study: self.study.round() as i64,
        }
    }
}

impl Default for StatVector {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// The player-visible fields, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleStats {
    /// Rounded trust.
    pub trust: i64,
    /// Rounded autonomy.
    pub autonomy: i64,
    /// Rounded study.
    pub study: i64,
}

/// Per-round change returned by the adjudicator. Missing fields mean zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Change to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<f64>,
    /// Change to autonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<f64>,
    /// Change to study.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study: Option<f64>,
    /// Change to risk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    /// Change to coherence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
}
