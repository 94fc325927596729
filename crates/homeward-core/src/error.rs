//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No events exist for the requested game.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict on append.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer expected.
        expected: i64,
        /// The version found in the journal.
        actual: i64,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The external adjudicator could not produce a usable outcome. Game
    /// state is untouched and the submission may be retried.
    #[error("adjudication failed: {0}")]
    Adjudication(String),

    /// A journal or serialization error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Whether the same request may be issued again without any state repair.
    #[must_use]
    pub fn is_retry_safe(&self) -> bool {
        matches!(
            self,
            Self::Adjudication(_) | Self::ConcurrencyConflict { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjudication_failures_are_retry_safe() {
        assert!(DomainError::Adjudication("timeout".into()).is_retry_safe());
        assert!(!DomainError::Validation("bad".into()).is_retry_safe());
        assert!(!DomainError::AggregateNotFound(Uuid::nil()).is_retry_safe());
    }
}
