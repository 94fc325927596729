//! Append-only log of completed rounds.

use serde::Serialize;

use homeward_adjudicator::AdjudicationResponse;
use homeward_sequence::Fragment;

/// One archived round. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    /// One-based round number.
    pub round: u32,
    /// The submitted arrangement, every fragment locked.
    pub fragments: Vec<Fragment>,
    /// The adjudication that closed the round.
    pub outcome: AdjudicationResponse,
}

/// Completed rounds in order. Round numbers are assigned on append, so a
/// submission that never completes never consumes one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
}

impl HistoryLog {
    /// Archives a round and returns the number it was given.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append(&mut self, fragments: Vec<Fragment>, outcome: AdjudicationResponse) -> u32 {
        let round = self.items.len() as u32 + 1;
        let fragments = fragments.iter().map(Fragment::archived).collect();
        self.items.push(HistoryItem {
            round,
            fragments,
            outcome,
        });
        round
    }

    /// The archived rounds, oldest first.
    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Number of archived rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no round has been archived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every archived fragment text, flattened in order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.fragments.iter().map(|f| f.text.clone()))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeward_sequence::FragmentSequence;
    use homeward_test_support::fixtures;

    #[test]
    fn test_rounds_are_numbered_from_one_in_append_order() {
        // Arrange
        let mut log = HistoryLog::default();
        let first = FragmentSequence::from_texts(1, ["a", "b"]);
        let second = FragmentSequence::from_texts(2, ["c"]);

        // Act
        let n1 = log.append(first.fragments().to_vec(), fixtures::stats_response(0.0));
        let n2 = log.append(second.fragments().to_vec(), fixtures::stats_response(0.0));

        // Assert
        assert_eq!((n1, n2), (1, 2));
        let rounds: Vec<u32> = log.items().iter().map(|i| i.round).collect();
        assert_eq!(rounds, vec![1, 2]);
        assert!(log.items().iter().flat_map(|i| &i.fragments).all(|f| f.locked));
    }

    #[test]
    fn test_texts_are_flattened_in_order() {
        let mut log = HistoryLog::default();
        log.append(
            FragmentSequence::from_texts(1, ["a", "b"]).fragments().to_vec(),
            fixtures::stats_response(0.0),
        );
        log.append(
            FragmentSequence::from_texts(2, ["c"]).fragments().to_vec(),
            fixtures::stats_response(0.0),
        );

        assert_eq!(log.texts(), vec!["a", "b", "c"]);
    }
}
