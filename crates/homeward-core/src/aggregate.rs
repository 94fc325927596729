//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for event-sourced aggregate roots.
///
/// State changes only through [`AggregateRoot::apply`]. Command methods on an
/// aggregate apply the event they produce right away and keep it queued as
/// uncommitted until the caller has appended it to the journal, so
/// `version()` always counts every event reflected in the in-memory state.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied, committed or not.
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns uncommitted events produced by command handling.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains the uncommitted events once they have been persisted.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;

    /// Version of the last event already present in the journal. This is the
    /// expected version for the next append.
    #[allow(clippy::cast_possible_wrap)]
    fn committed_version(&self) -> i64 {
        self.version() - self.uncommitted_events().len() as i64
    }

    /// Sequence number the next produced event will carry.
    fn next_sequence_number(&self) -> i64 {
        self.version() + 1
    }
}
