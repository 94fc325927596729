//! Fragment records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a fragment.
///
/// Generated ids follow `"{round}-{n}"` for base fragments and
/// `"{round}-alt-{n}"` for alternatives, with `n` starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    /// Wraps an arbitrary identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the `index`-th (zero-based) base fragment of `round`.
    #[must_use]
    pub fn base(round: u32, index: usize) -> Self {
        Self(format!("{round}-{}", index + 1))
    }

    /// Id of the `index`-th (zero-based) alternative offered in `round`.
    #[must_use]
    pub fn alternative(round: u32, index: usize) -> Self {
        Self(format!("{round}-alt-{}", index + 1))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FragmentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A unit of narrative text the player can arrange.
///
/// The text is never inspected or altered by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Stable identifier, unique within one round.
    pub id: FragmentId,
    /// Narrative text.
    pub text: String,
    /// Narrative anchor: excluded from reordering.
    pub fixed: bool,
    /// Belongs to an archived round; rendered only.
    pub locked: bool,
    /// Inserted this round from the alternative pool.
    pub pending: bool,
}

impl Fragment {
    /// An anchor fragment.
    pub fn anchor(id: FragmentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            fixed: true,
            locked: false,
            pending: false,
        }
    }

    /// An ordinary, freely movable fragment.
    pub fn movable(id: FragmentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            fixed: false,
            locked: false,
            pending: false,
        }
    }

    /// A candidate fragment in the alternative pool.
    pub fn alternative(id: FragmentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            fixed: false,
            locked: false,
            pending: true,
        }
    }

    /// Whether the player may drag this fragment within the active sequence.
    #[must_use]
    pub fn is_movable(&self) -> bool {
        !self.fixed && !self.locked
    }

    /// The same fragment frozen for the history log.
    #[must_use]
    pub fn archived(&self) -> Self {
        Self {
            locked: true,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_one_based_per_round() {
        assert_eq!(FragmentId::base(1, 0).as_str(), "1-1");
        assert_eq!(FragmentId::base(3, 4).as_str(), "3-5");
        assert_eq!(FragmentId::alternative(2, 0).as_str(), "2-alt-1");
    }

    #[test]
    fn test_archived_fragment_is_locked_and_keeps_other_flags() {
        let fragment = Fragment::alternative(FragmentId::new("x"), "text");

        let archived = fragment.archived();

        assert!(archived.locked);
        assert!(archived.pending);
        assert!(!archived.fixed);
        assert!(!archived.is_movable());
        assert_eq!(archived.text, "text");
    }

    #[test]
    fn test_fragment_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&FragmentId::new("1-2")).unwrap();
        assert_eq!(json, "\"1-2\"");
    }
}
