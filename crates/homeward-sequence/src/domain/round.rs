//! The active round: sequence, pool and the one-insertion gate.

use tracing::debug;

use super::fragment::FragmentId;
use super::intent::Intent;
use super::pool::AlternativePool;
use super::sequence::FragmentSequence;

/// Whether a pool candidate may still be moved into the sequence this round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionGate {
    /// No candidate has been inserted yet.
    Open,
    /// A candidate was inserted; further insertions are ignored.
    Closed {
        /// The candidate that went in.
        inserted: FragmentId,
    },
}

/// Everything the player can manipulate during one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRound {
    number: u32,
    sequence: FragmentSequence,
    pool: AlternativePool,
    gate: InsertionGate,
    alternative_required: bool,
}

impl ActiveRound {
    /// Starts round `number`. An insertion is required before submission
    /// exactly when the round opens with a non-empty pool.
    #[must_use]
    pub fn new(number: u32, sequence: FragmentSequence, pool: AlternativePool) -> Self {
        let alternative_required = !pool.is_empty();
        Self {
            number,
            sequence,
            pool,
            gate: InsertionGate::Open,
            alternative_required,
        }
    }

    /// Starts round `number` from raw texts: first base text anchored, every
    /// alternative pending.
    #[must_use]
    pub fn from_texts(number: u32, fragments: &[String], alternatives: &[String]) -> Self {
        Self::new(
            number,
            FragmentSequence::from_texts(number, fragments.iter().cloned()),
            AlternativePool::from_texts(number, alternatives.iter().cloned()),
        )
    }

    /// One-based round number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The active sequence.
    #[must_use]
    pub fn sequence(&self) -> &FragmentSequence {
        &self.sequence
    }

    /// The remaining alternatives.
    #[must_use]
    pub fn pool(&self) -> &AlternativePool {
        &self.pool
    }

    /// Current state of the insertion gate.
    #[must_use]
    pub fn gate(&self) -> &InsertionGate {
        &self.gate
    }

    /// Whether a candidate has already been inserted this round.
    #[must_use]
    pub fn has_added_alternative(&self) -> bool {
        matches!(self.gate, InsertionGate::Closed { .. })
    }

    /// Whether the arrangement satisfies the insertion requirement.
    #[must_use]
    pub fn is_ready_for_submission(&self) -> bool {
        !self.alternative_required || self.has_added_alternative()
    }

    /// Moves a candidate from the pool into the sequence. Ignored when the
    /// gate is closed, the candidate is unknown, or its id already sits in
    /// the sequence. Returns whether anything moved.
    pub fn insert_from_pool(&mut self, fragment_id: &FragmentId, target_id: Option<&FragmentId>) -> bool {
        if self.has_added_alternative() {
            debug!(fragment_id = %fragment_id, "insertion gate closed, ignoring");
            return false;
        }
        if self.sequence.contains(fragment_id) {
            return false;
        }
        let Some(fragment) = self.pool.take(fragment_id) else {
            return false;
        };
        if !self.sequence.insert_before(fragment, target_id) {
            return false;
        }
        self.gate = InsertionGate::Closed {
            inserted: fragment_id.clone(),
        };
        true
    }

    /// Dispatches an intent. Returns whether state changed.
    pub fn apply_intent(&mut self, intent: &Intent) -> bool {
        match intent {
            Intent::Reorder {
                moving_id,
                target_id,
            } => self.sequence.reorder(moving_id, target_id),
            Intent::InsertFromPool {
                fragment_id,
                target_id,
            } => self.insert_from_pool(fragment_id, target_id.as_ref()),
            Intent::ReorderPool {
                moving_id,
                target_id,
            } => self.pool.reorder(moving_id, target_id),
        }
    }
}
