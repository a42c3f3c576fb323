//! Transcript assembly.
//!
//! A [`Transcript`] is the only artifact that outlives an event run. It is
//! assembled once from the accepted turns and the closing summary, and the
//! assembler re-checks the structural rules so that a transcript that exists
//! is a valid one:
//!
//! - turn numbers run 1..=N without gaps
//! - every speaker is one of the two configured characters
//! - `min_interactions <= N <= max_interactions`
//! - a character's final mood is the mood on their last turn, or their
//!   initial mood when they never spoke

use serde::{Deserialize, Serialize};

use super::config::{EventConfig, Participant};
use super::turn::Turn;
use crate::error::DomainError;
use crate::value_objects::CharacterMood;

/// Closing text produced once the last turn has been taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingSummary {
    pub summary: String,
    pub outcome: String,
}

impl ClosingSummary {
    pub fn new(summary: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            outcome: outcome.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub turns: Vec<Turn>,
    pub summary: String,
    pub outcome: String,
    pub character_a_final_mood: CharacterMood,
    pub character_b_final_mood: CharacterMood,
    /// Why the event stopped, when known
    #[serde(default)]
    pub end_reason: Option<String>,
}

impl Transcript {
    pub fn assemble(
        config: &EventConfig,
        turns: Vec<Turn>,
        closing: ClosingSummary,
        end_reason: Option<String>,
    ) -> Result<Self, DomainError> {
        check_turns(config, &turns)?;

        let character_a_final_mood = final_mood(config, &turns, Participant::A);
        let character_b_final_mood = final_mood(config, &turns, Participant::B);

        Ok(Self {
            turns,
            summary: closing.summary,
            outcome: closing.outcome,
            character_a_final_mood,
            character_b_final_mood,
            end_reason,
        })
    }

    pub fn final_mood(&self, participant: Participant) -> CharacterMood {
        match participant {
            Participant::A => self.character_a_final_mood,
            Participant::B => self.character_b_final_mood,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

/// Mood on the participant's last turn, falling back to their initial mood.
pub fn final_mood(config: &EventConfig, turns: &[Turn], participant: Participant) -> CharacterMood {
    let id = config.character_id(participant);
    turns
        .iter()
        .rev()
        .find(|turn| turn.speaker_id == id)
        .map(|turn| turn.mood)
        .unwrap_or_else(|| config.initial_mood(participant))
}

fn check_turns(config: &EventConfig, turns: &[Turn]) -> Result<(), DomainError> {
    let count = turns.len() as u32;
    if count < config.min_interactions || count > config.max_interactions {
        return Err(DomainError::constraint(format!(
            "{} turns outside bounds {}..={}",
            count, config.min_interactions, config.max_interactions
        )));
    }

    for (index, turn) in turns.iter().enumerate() {
        let expected = index as u32 + 1;
        if turn.turn_number != expected {
            return Err(DomainError::constraint(format!(
                "turn {} found where turn {} was expected",
                turn.turn_number, expected
            )));
        }
        if config.participant(turn.speaker_id).is_none() {
            return Err(DomainError::constraint(format!(
                "turn {} spoken by {}, who is not a participant",
                turn.turn_number, turn.speaker_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CharacterId;
    use crate::value_objects::EventType;

    fn config(min: u32, max: u32) -> EventConfig {
        EventConfig::new(
            EventType::Argument,
            "Who left the gate open",
            "goat pen",
            CharacterId::new(),
            CharacterId::new(),
        )
        .with_bounds(min, max)
        .with_initial_moods(CharacterMood::Suspicious, CharacterMood::Nervous)
    }

    fn turn(n: u32, speaker: CharacterId, mood: CharacterMood) -> Turn {
        Turn::new(n, speaker, "someone", Some(format!("line {n}")), None, mood, 0)
            .expect("valid turn")
    }

    fn closing() -> ClosingSummary {
        ClosingSummary::new("They argued.", "The gate stays shut.")
    }

    #[test]
    fn final_moods_come_from_last_turn_per_speaker() {
        let config = config(1, 5);
        let a = config.character_a_id;
        let b = config.character_b_id;
        let turns = vec![
            turn(1, a, CharacterMood::Angry),
            turn(2, b, CharacterMood::Scared),
            turn(3, a, CharacterMood::Grateful),
        ];

        let transcript = Transcript::assemble(&config, turns, closing(), None).expect("valid");

        assert_eq!(transcript.character_a_final_mood, CharacterMood::Grateful);
        assert_eq!(transcript.character_b_final_mood, CharacterMood::Scared);
        assert_eq!(transcript.summary, "They argued.");
        assert_eq!(transcript.outcome, "The gate stays shut.");
    }

    #[test]
    fn silent_character_keeps_initial_mood() {
        let config = config(2, 2);
        let a = config.character_a_id;
        let turns = vec![turn(1, a, CharacterMood::Angry), turn(2, a, CharacterMood::Happy)];

        let transcript = Transcript::assemble(&config, turns, closing(), None).expect("valid");

        assert_eq!(transcript.final_mood(Participant::A), CharacterMood::Happy);
        assert_eq!(transcript.final_mood(Participant::B), CharacterMood::Nervous);
    }

    #[test]
    fn rejects_gaps_in_numbering() {
        let config = config(2, 4);
        let a = config.character_a_id;
        let turns = vec![turn(1, a, CharacterMood::Angry), turn(3, a, CharacterMood::Angry)];

        let err = Transcript::assemble(&config, turns, closing(), None).unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
    }

    #[test]
    fn rejects_outside_speaker() {
        let config = config(1, 4);
        let turns = vec![turn(1, CharacterId::new(), CharacterMood::Angry)];

        assert!(Transcript::assemble(&config, turns, closing(), None).is_err());
    }

    #[test]
    fn rejects_turn_count_outside_bounds() {
        let config = config(3, 4);
        let a = config.character_a_id;
        let turns = vec![turn(1, a, CharacterMood::Angry)];

        let err = Transcript::assemble(&config, turns, closing(), None).unwrap_err();
        assert!(err.to_string().contains("outside bounds"));
    }

    #[test]
    fn survives_json_round_trip() {
        let config = config(1, 5);
        let a = config.character_a_id;
        let b = config.character_b_id;
        let turns = vec![
            turn(1, a, CharacterMood::Angry),
            Turn::new(2, b, "Tobin", None, Some("backs away".into()), CharacterMood::InLove, 0)
                .expect("valid turn"),
            turn(3, a, CharacterMood::Jealous),
        ];
        let transcript = Transcript::assemble(
            &config,
            turns,
            ClosingSummary::new("Resumen: discutieron.", "Se reconciliaron."),
            Some("natural conclusion".into()),
        )
        .expect("valid");

        let json = serde_json::to_string_pretty(&transcript).expect("serialize");
        let restored: Transcript = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored, transcript);
        let numbers: Vec<u32> = restored.turns.iter().map(|t| t.turn_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(restored.turns[1].mood, CharacterMood::InLove);
        assert_eq!(restored.summary, "Resumen: discutieron.");
    }
}
