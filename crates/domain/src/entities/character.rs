//! Character profile consumed by event generation.
//!
//! Profiles are produced and stored by the character subsystem. Event
//! generation only reads them: the speaking character's profile shapes its
//! responses, while the counterpart is exposed through [`CharacterProfile::public_view`].

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Build {
    Slim,
    Average,
    Athletic,
    Stocky,
    Heavy,
}

/// The four classical temperaments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperament {
    Choleric,
    Sanguine,
    Melancholic,
    Phlegmatic,
}

impl Temperament {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temperament::Choleric => "choleric",
            Temperament::Sanguine => "sanguine",
            Temperament::Melancholic => "melancholic",
            Temperament::Phlegmatic => "phlegmatic",
        }
    }

    /// One-line behavioural sketch used in generation context
    pub fn description(&self) -> &'static str {
        match self {
            Temperament::Choleric => "ambitious and decisive, quick to anger",
            Temperament::Sanguine => "optimistic and social, impulsive",
            Temperament::Melancholic => "thoughtful and loyal, prone to worry",
            Temperament::Phlegmatic => "calm and patient, avoids conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub height_cm: u16,
    pub build: Build,
    pub hair_color: String,
    pub hair_style: String,
    pub eye_color: String,
    pub skin_tone: String,
    #[serde(default)]
    pub distinguishing_features: Vec<String>,
    pub clothing_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub temperament: Temperament,
    pub positive_traits: Vec<String>,
    pub negative_traits: Vec<String>,
    #[serde(default)]
    pub quirks: Vec<String>,
    pub values: Vec<String>,
    #[serde(default)]
    pub fears: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub age_at_event: u16,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backstory {
    pub origin_village: String,
    pub family_status: String,
    pub parents_occupation: String,
    pub reason_for_arrival: String,
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub secrets: Vec<String>,
}

/// Stats on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub occupation: String,
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    pub stats: StatBlock,
    #[serde(default)]
    pub special_talent: Option<String>,
}

/// A village character as stored by the character subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub name: String,
    pub age: u16,
    pub gender: Gender,
    pub appearance: Appearance,
    pub personality: Personality,
    pub backstory: Backstory,
    pub skills: Skills,
    #[serde(default)]
    pub portrait_description: String,
}

impl CharacterProfile {
    /// What the other participant is allowed to know about this character.
    pub fn public_view(&self) -> CounterpartView {
        CounterpartView {
            id: self.id,
            name: self.name.clone(),
            occupation: self.skills.occupation.clone(),
        }
    }
}

/// Publicly observable facts about the other participant in an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartView {
    pub id: CharacterId,
    pub name: String,
    pub occupation: String,
}
