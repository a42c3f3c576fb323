//! Event configuration and participant addressing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{CharacterMood, EventType};

pub const DEFAULT_MIN_INTERACTIONS: u32 = 3;
pub const DEFAULT_MAX_INTERACTIONS: u32 = 6;
/// Highest accepted `min_interactions`
pub const MIN_INTERACTIONS_CEILING: u32 = 20;
/// Highest accepted `max_interactions`
pub const MAX_INTERACTIONS_CEILING: u32 = 30;
pub const DEFAULT_LANGUAGE: &str = "spanish";

fn default_min_interactions() -> u32 {
    DEFAULT_MIN_INTERACTIONS
}

fn default_max_interactions() -> u32 {
    DEFAULT_MAX_INTERACTIONS
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// One of the two seats in an event.
///
/// Every event has exactly two participants, so speaker dispatch is a match
/// over this enum rather than an open lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    #[serde(rename = "character_a")]
    A,
    #[serde(rename = "character_b")]
    B,
}

impl Participant {
    pub fn other(self) -> Self {
        match self {
            Participant::A => Participant::B,
            Participant::B => Participant::A,
        }
    }

    /// Label used in prompts and generated JSON
    pub fn label(self) -> &'static str {
        match self {
            Participant::A => "character_a",
            Participant::B => "character_b",
        }
    }

    /// Accepts `character_a`, `a`, `A` and the like.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "character_a" | "a" | "character a" => Some(Participant::A),
            "character_b" | "b" | "character b" => Some(Participant::B),
            _ => None,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable description of the event to generate.
///
/// Built once per request. Call [`EventConfig::validate`] before running it;
/// the event driver does so at start and refuses invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub event_type: EventType,
    pub description: String,
    pub location: String,
    pub character_a_id: CharacterId,
    pub character_b_id: CharacterId,
    #[serde(default)]
    pub character_a_mood: CharacterMood,
    #[serde(default)]
    pub character_b_mood: CharacterMood,
    /// Advisory: guides generation, never enforced
    #[serde(default)]
    pub character_a_target_mood: Option<CharacterMood>,
    /// Advisory: guides generation, never enforced
    #[serde(default)]
    pub character_b_target_mood: Option<CharacterMood>,
    #[serde(default = "default_min_interactions")]
    pub min_interactions: u32,
    #[serde(default = "default_max_interactions")]
    pub max_interactions: u32,
    #[serde(default = "default_language")]
    pub language: String,
    /// In-world moment the event happens; stamped at generation when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl EventConfig {
    pub fn new(
        event_type: EventType,
        description: impl Into<String>,
        location: impl Into<String>,
        character_a_id: CharacterId,
        character_b_id: CharacterId,
    ) -> Self {
        Self {
            event_type,
            description: description.into(),
            location: location.into(),
            character_a_id,
            character_b_id,
            character_a_mood: CharacterMood::default(),
            character_b_mood: CharacterMood::default(),
            character_a_target_mood: None,
            character_b_target_mood: None,
            min_interactions: DEFAULT_MIN_INTERACTIONS,
            max_interactions: DEFAULT_MAX_INTERACTIONS,
            language: default_language(),
            timestamp: None,
        }
    }

    pub fn with_bounds(mut self, min_interactions: u32, max_interactions: u32) -> Self {
        self.min_interactions = min_interactions;
        self.max_interactions = max_interactions;
        self
    }

    pub fn with_initial_moods(mut self, a: CharacterMood, b: CharacterMood) -> Self {
        self.character_a_mood = a;
        self.character_b_mood = b;
        self
    }

    pub fn with_target_moods(mut self, a: Option<CharacterMood>, b: Option<CharacterMood>) -> Self {
        self.character_a_target_mood = a;
        self.character_b_target_mood = b;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check every configuration rule, reporting the first one broken.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.character_a_id == self.character_b_id {
            return Err(DomainError::validation(format!(
                "an event needs two different characters, got {} twice",
                self.character_a_id
            )));
        }
        if self.min_interactions < 1 || self.max_interactions < 1 {
            return Err(DomainError::validation(format!(
                "interaction bounds must be at least 1 (min={}, max={})",
                self.min_interactions, self.max_interactions
            )));
        }
        if self.min_interactions > self.max_interactions {
            return Err(DomainError::validation(format!(
                "min_interactions ({}) exceeds max_interactions ({})",
                self.min_interactions, self.max_interactions
            )));
        }
        if self.min_interactions > MIN_INTERACTIONS_CEILING {
            return Err(DomainError::validation(format!(
                "min_interactions ({}) exceeds the ceiling of {}",
                self.min_interactions, MIN_INTERACTIONS_CEILING
            )));
        }
        if self.max_interactions > MAX_INTERACTIONS_CEILING {
            return Err(DomainError::validation(format!(
                "max_interactions ({}) exceeds the ceiling of {}",
                self.max_interactions, MAX_INTERACTIONS_CEILING
            )));
        }
        for (field, value) in [
            ("description", &self.description),
            ("location", &self.location),
            ("language", &self.language),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    pub fn character_id(&self, participant: Participant) -> CharacterId {
        match participant {
            Participant::A => self.character_a_id,
            Participant::B => self.character_b_id,
        }
    }

    /// Which seat a character id occupies, if any.
    pub fn participant(&self, id: CharacterId) -> Option<Participant> {
        if id == self.character_a_id {
            Some(Participant::A)
        } else if id == self.character_b_id {
            Some(Participant::B)
        } else {
            None
        }
    }

    pub fn initial_mood(&self, participant: Participant) -> CharacterMood {
        match participant {
            Participant::A => self.character_a_mood,
            Participant::B => self.character_b_mood,
        }
    }

    pub fn target_mood(&self, participant: Participant) -> Option<CharacterMood> {
        match participant {
            Participant::A => self.character_a_target_mood,
            Participant::B => self.character_b_target_mood,
        }
    }
}
