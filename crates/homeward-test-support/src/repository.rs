//! Test repositories: mock `EventRepository` implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use homeward_core::error::DomainError;
use homeward_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// An event repository that records every append and replays the seed
/// events followed by everything appended so far on each load. Expected
/// versions are recorded, not checked.
#[derive(Debug, Default)]
pub struct RecordingEventRepository {
    seed: Vec<StoredEvent>,
    appended: Mutex<Vec<(Uuid, i64, Vec<StoredEvent>)>>,
    loads: AtomicUsize,
    conflicts_remaining: AtomicUsize,
}

impl RecordingEventRepository {
    /// A repository whose journal starts with `seed`.
    #[must_use]
    pub fn new(seed: Vec<StoredEvent>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Makes the next `count` appends fail with a concurrency conflict.
    #[must_use]
    pub fn with_conflicts(self, count: usize) -> Self {
        self.conflicts_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Every successful append as `(aggregate_id, expected_version, events)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<(Uuid, i64, Vec<StoredEvent>)> {
        self.appended.lock().unwrap().clone()
    }

    /// Number of `load_events` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let mut events = self.seed.clone();
        for (_, _, batch) in self.appended.lock().unwrap().iter() {
            events.extend(batch.iter().cloned());
        }
        Ok(events)
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let conflict = self
            .conflicts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if conflict {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual: expected_version + 1,
            });
        }
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }
}

/// An event repository that always returns an empty event list and silently
/// accepts appends. Useful for "game not found" scenarios and creation
/// commands.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// An event repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("journal unavailable".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("journal unavailable".into()))
    }
}
