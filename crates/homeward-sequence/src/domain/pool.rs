//! The per-round pool of alternative fragments.

use serde::{Deserialize, Serialize};

use super::fragment::{Fragment, FragmentId};

/// Candidate fragments offered for one-time insertion into the sequence.
///
/// Reordering inside the pool is unconstrained. Fragments only ever leave the
/// pool; nothing is returned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativePool {
    fragments: Vec<Fragment>,
}

impl AlternativePool {
    /// Builds the pool offered in `round`; every entry is pending and movable.
    pub fn from_texts<I, S>(round: u32, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Fragment::alternative(FragmentId::alternative(round, index), text))
            .collect();
        Self { fragments }
    }

    /// The candidates in display order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Whether the pool is exhausted or was never filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of candidates left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Plain remove-then-insert move; returns whether the order changed.
    pub fn reorder(&mut self, moving_id: &FragmentId, target_id: &FragmentId) -> bool {
        if moving_id == target_id {
            return false;
        }
        let from = self.fragments.iter().position(|f| &f.id == moving_id);
        let to = self.fragments.iter().position(|f| &f.id == target_id);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        let moved = self.fragments.remove(from);
        self.fragments.insert(to, moved);
        true
    }

    /// Removes a candidate, marking it pending.
    pub fn take(&mut self, id: &FragmentId) -> Option<Fragment> {
        let index = self.fragments.iter().position(|f| &f.id == id)?;
        let mut fragment = self.fragments.remove(index);
        fragment.pending = true;
        fragment.fixed = false;
        Some(fragment)
    }
}
