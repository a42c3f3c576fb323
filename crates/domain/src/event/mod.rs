//! Event types: configuration, turns, transcripts and stored records.

mod config;
mod record;
mod transcript;
mod turn;

pub use config::{
    EventConfig, Participant, DEFAULT_LANGUAGE, DEFAULT_MAX_INTERACTIONS,
    DEFAULT_MIN_INTERACTIONS, MAX_INTERACTIONS_CEILING, MIN_INTERACTIONS_CEILING,
};
pub use record::EventRecord;
pub use transcript::{final_mood, ClosingSummary, Transcript};
pub use turn::Turn;
