//! The active fragment sequence of one round.

use serde::{Deserialize, Serialize};

use super::fragment::{Fragment, FragmentId};

/// Ordered fragments the player arranges before submitting.
///
/// Invariants: ids are unique; fragments that are not movable (fixed anchors,
/// or locked fragments should any appear) keep their absolute slots across
/// every reorder, so the relative order of anchors can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentSequence {
    fragments: Vec<Fragment>,
}

impl FragmentSequence {
    /// Builds a sequence from already-constructed fragments, dropping any
    /// later duplicate of an id seen earlier.
    #[must_use]
    pub fn new(fragments: Vec<Fragment>) -> Self {
        let mut unique: Vec<Fragment> = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            if unique.iter().all(|f| f.id != fragment.id) {
                unique.push(fragment);
            }
        }
        Self { fragments: unique }
    }

    /// Builds the base sequence of `round` from raw texts. The first text is
    /// the round's anchor; the rest are movable.
    pub fn from_texts<I, S>(round: u32, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let id = FragmentId::base(round, index);
                if index == 0 {
                    Fragment::anchor(id, text)
                } else {
                    Fragment::movable(id, text)
                }
            })
            .collect();
        Self { fragments }
    }

    /// The fragments in their current order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of fragments in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the sequence holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Position of the fragment with `id`, if present.
    #[must_use]
    pub fn position(&self, id: &FragmentId) -> Option<usize> {
        self.fragments.iter().position(|f| &f.id == id)
    }

    /// Whether a fragment with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &FragmentId) -> bool {
        self.position(id).is_some()
    }

    /// Moves `moving_id` to the slot `target_id` currently occupies, shifting
    /// the movable fragments in between by one (remove-then-insert, not a
    /// swap). Anchors stay where they are.
    ///
    /// Illegal requests are ignored: identical ids, a missing fragment, or
    /// either fragment being fixed or locked. Returns whether the order
    /// changed.
    pub fn reorder(&mut self, moving_id: &FragmentId, target_id: &FragmentId) -> bool {
        if moving_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(moving_id), self.position(target_id)) else {
            return false;
        };
        if !self.fragments[from].is_movable() || !self.fragments[to].is_movable() {
            return false;
        }

        let slots: Vec<usize> = self
            .fragments
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_movable())
            .map(|(index, _)| index)
            .collect();
        let (Some(from_slot), Some(to_slot)) = (
            slots.iter().position(|&i| i == from),
            slots.iter().position(|&i| i == to),
        ) else {
            return false;
        };

        let mut movable: Vec<Fragment> = slots.iter().map(|&i| self.fragments[i].clone()).collect();
        let moved = movable.remove(from_slot);
        movable.insert(to_slot, moved);
        for (slot, fragment) in slots.into_iter().zip(movable) {
            self.fragments[slot] = fragment;
        }
        true
    }

    /// Splices `fragment` in immediately before `target_id`, or at the end
    /// when there is no target or the target is not in the sequence. A target
    /// that is an anchor receives the fragment right after it instead, so an
    /// anchor is never pushed down by an insertion onto it.
    ///
    /// Returns `false`, leaving the sequence untouched, if a fragment with the
    /// same id is already present.
    pub fn insert_before(&mut self, fragment: Fragment, target_id: Option<&FragmentId>) -> bool {
        if self.contains(&fragment.id) {
            return false;
        }
        let index = match target_id.and_then(|id| self.position(id)) {
            Some(i) if !self.fragments[i].is_movable() => i + 1,
            Some(i) => i,
            None => self.fragments.len(),
        };
        self.fragments.insert(index, fragment);
        true
    }

    /// The ordered texts, exactly as they are sent for adjudication.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.fragments.iter().map(|f| f.text.clone()).collect()
    }

    /// The fragments frozen for the history log.
    #[must_use]
    pub fn archive(&self) -> Vec<Fragment> {
        self.fragments.iter().map(Fragment::archived).collect()
    }
}
