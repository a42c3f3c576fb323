use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::CharacterMood;

/// One character's contribution to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based position in the event
    pub turn_number: u32,
    pub speaker_id: CharacterId,
    /// Display name of the speaker at generation time
    pub speaker_name: String,
    pub dialogue: Option<String>,
    pub action: Option<String>,
    /// Speaker's mood while taking this turn
    pub mood: CharacterMood,
    /// Turns still required before the event may end
    pub remaining_interactions: u32,
}

impl Turn {
    /// Build a turn, treating blank dialogue/action as absent.
    ///
    /// Fails when neither dialogue nor action carries any text.
    pub fn new(
        turn_number: u32,
        speaker_id: CharacterId,
        speaker_name: impl Into<String>,
        dialogue: Option<String>,
        action: Option<String>,
        mood: CharacterMood,
        remaining_interactions: u32,
    ) -> Result<Self, DomainError> {
        if turn_number == 0 {
            return Err(DomainError::validation("turn numbers start at 1"));
        }
        let dialogue = non_blank(dialogue);
        let action = non_blank(action);
        if dialogue.is_none() && action.is_none() {
            return Err(DomainError::validation(format!(
                "turn {turn_number} has neither dialogue nor action"
            )));
        }
        Ok(Self {
            turn_number,
            speaker_id,
            speaker_name: speaker_name.into(),
            dialogue,
            action,
            mood,
            remaining_interactions,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
