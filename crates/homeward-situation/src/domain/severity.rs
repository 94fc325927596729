//! Severity-scalar situation.

use serde::{Deserialize, Serialize};

/// Label shown at the start of a severity game.
pub const INITIAL_STATUS_LABEL: &str = "风平浪静";

/// A single danger score with a free-text label.
///
/// The score is stored as received. Anything shown to the player goes
/// through [`SeverityScalar::display_severity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityScalar {
    /// 0 is perfectly safe, 100 is fully exposed.
    pub severity: f64,
    /// Short description of the current state.
    pub status_label: String,
}

impl SeverityScalar {
    /// Builds a severity situation.
    pub fn new(severity: f64, status_label: impl Into<String>) -> Self {
        Self {
            severity,
            status_label: status_label.into(),
        }
    }

    /// Starting value of a new severity game.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(15.0, INITIAL_STATUS_LABEL)
    }

    /// The score clamped to `[0, 100]`; non-finite scores read as 0.
    #[must_use]
    pub fn display_severity(&self) -> f64 {
        if self.severity.is_finite() {
            self.severity.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

impl Default for SeverityScalar {
    fn default() -> Self {
        Self::initial()
    }
}
