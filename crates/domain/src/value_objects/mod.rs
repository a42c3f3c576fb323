//! Value objects - Immutable objects defined by their attributes

mod event_type;
mod mood;

pub use event_type::EventType;
pub use mood::CharacterMood;
