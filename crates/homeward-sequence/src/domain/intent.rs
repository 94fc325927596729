//! Player intents produced by the input layer.

use serde::{Deserialize, Serialize};

use super::fragment::FragmentId;

/// What a completed drag gesture asks the engine to do. Raw pointer or
/// keyboard events never reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Move a fragment of the active sequence onto another one.
    Reorder {
        /// The dragged fragment.
        moving_id: FragmentId,
        /// The fragment it was dropped on.
        target_id: FragmentId,
    },
    /// Move a pool candidate into the active sequence.
    InsertFromPool {
        /// The pool candidate.
        fragment_id: FragmentId,
        /// The sequence fragment it was dropped on; absent when dropped on
        /// the sequence's tail or on the pool itself.
        #[serde(default)]
        target_id: Option<FragmentId>,
    },
    /// Rearrange candidates inside the pool.
    ReorderPool {
        /// The dragged candidate.
        moving_id: FragmentId,
        /// The candidate it was dropped on.
        target_id: FragmentId,
    },
}

impl Intent {
    /// Short name used in logs and event routing.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Reorder { .. } => "reorder",
            Self::InsertFromPool { .. } => "insert_from_pool",
            Self::ReorderPool { .. } => "reorder_pool",
        }
    }
}
