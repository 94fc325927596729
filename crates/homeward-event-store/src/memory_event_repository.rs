//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use homeward_core::error::DomainError;
use homeward_core::repository::{EventRepository, StoredEvent};

/// Process-lifetime event journal with optimistic concurrency. Clones share
/// the same journal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    streams: Arc<RwLock<HashMap<Uuid, Vec<StoredEvent>>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.read().await;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if let Some(stray) = events.iter().find(|e| e.aggregate_id != aggregate_id) {
            return Err(DomainError::Validation(format!(
                "event {} belongs to aggregate {}, not {aggregate_id}",
                stray.event_id, stray.aggregate_id
            )));
        }

        let mut streams = self.streams.write().await;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = i64::try_from(stream.len())
            .map_err(|e| DomainError::Infrastructure(format!("stream too long: {e}")))?;
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        stream.extend_from_slice(events);
        debug!(%aggregate_id, appended = events.len(), version = stream.len(), "events appended");
        Ok(())
    }
}
