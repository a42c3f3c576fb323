//! Repository port traits for stored characters and events.

use async_trait::async_trait;
use villagesim_domain::{CharacterId, CharacterProfile, EventId, EventRecord};

use super::error::RepoError;

// =============================================================================
// Character Storage
// =============================================================================

/// Character profile lookup, owned by the character subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterProfile>, RepoError>;
    async fn save(&self, character: &CharacterProfile) -> Result<(), RepoError>;
}

// =============================================================================
// Event Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepo: Send + Sync {
    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, RepoError>;
    async fn save(&self, record: &EventRecord) -> Result<(), RepoError>;
    /// All readable records, in no particular order.
    async fn list(&self) -> Result<Vec<EventRecord>, RepoError>;
    /// Returns false when there was nothing to delete.
    async fn delete(&self, id: EventId) -> Result<bool, RepoError>;
}
