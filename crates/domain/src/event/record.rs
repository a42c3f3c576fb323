use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::EventConfig;
use super::transcript::Transcript;
use crate::ids::{CharacterId, EventId};

/// A generated event as persisted: the config that produced it, its
/// transcript, and metadata stamped by whoever stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub config: EventConfig,
    pub transcript: Transcript,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub generation_time_ms: u64,
}

impl EventRecord {
    pub fn new(
        id: EventId,
        config: EventConfig,
        transcript: Transcript,
        generated_at: DateTime<Utc>,
        generation_time_ms: u64,
    ) -> Self {
        Self {
            id,
            config,
            transcript,
            generated_at,
            generation_time_ms,
        }
    }

    /// Whether the character took part in this event.
    pub fn involves(&self, character_id: CharacterId) -> bool {
        self.config.participant(character_id).is_some()
    }
}
