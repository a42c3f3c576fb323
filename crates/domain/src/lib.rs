//! VillageSim domain types.
//!
//! Pure data and invariants for generated character events. No I/O lives here;
//! the engine crate owns ports, adapters and orchestration.

pub mod entities;
pub mod error;
pub mod event;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Appearance, Backstory, Build, CharacterProfile, CounterpartView, Gender, LifeEvent,
    Personality, Skills, StatBlock, Temperament,
};

pub use error::DomainError;

pub use event::{
    final_mood, ClosingSummary, EventConfig, EventRecord, Participant, Transcript, Turn,
    DEFAULT_LANGUAGE, DEFAULT_MAX_INTERACTIONS, DEFAULT_MIN_INTERACTIONS,
    MAX_INTERACTIONS_CEILING, MIN_INTERACTIONS_CEILING,
};

// Re-export ID types
pub use ids::{CharacterId, EventId};

pub use value_objects::{CharacterMood, EventType};
