//! Stored event lookups: list, get, delete.

use std::sync::Arc;

use villagesim_domain::{CharacterId, EventId, EventRecord};

use crate::infrastructure::ports::{EventRepo, RepoError};

/// List stored events, newest first.
pub struct ListEvents {
    events: Arc<dyn EventRepo>,
}

impl ListEvents {
    pub fn new(events: Arc<dyn EventRepo>) -> Self {
        Self { events }
    }

    /// All events, or only those `character` took part in.
    pub async fn execute(
        &self,
        character: Option<CharacterId>,
    ) -> Result<Vec<EventRecord>, RepoError> {
        let mut records = self.events.list().await?;
        if let Some(character_id) = character {
            records.retain(|record| record.involves(character_id));
        }
        records.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(records)
    }
}

pub struct GetEvent {
    events: Arc<dyn EventRepo>,
}

impl GetEvent {
    pub fn new(events: Arc<dyn EventRepo>) -> Self {
        Self { events }
    }

    pub async fn execute(&self, id: EventId) -> Result<Option<EventRecord>, RepoError> {
        self.events.get(id).await
    }
}

pub struct DeleteEvent {
    events: Arc<dyn EventRepo>,
}

impl DeleteEvent {
    pub fn new(events: Arc<dyn EventRepo>) -> Self {
        Self { events }
    }

    /// Returns false when no such event was stored.
    pub async fn execute(&self, id: EventId) -> Result<bool, RepoError> {
        let deleted = self.events.delete(id).await?;
        if deleted {
            tracing::info!(event_id = %id, "Event deleted");
        } else {
            tracing::debug!(event_id = %id, "Event to delete was not found");
        }
        Ok(deleted)
    }
}
