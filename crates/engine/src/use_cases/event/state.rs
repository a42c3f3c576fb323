//! Mutable state of a single event run.

use villagesim_domain::{CharacterMood, EventConfig, Participant, Turn};

use super::error::EventError;

/// Progress of one event run.
///
/// Created by the driver at start and consumed when the transcript is
/// assembled. Capabilities only ever receive `&EventState`; the mutators are
/// visible to the event module alone.
#[derive(Debug, Clone)]
pub struct EventState {
    turn_counter: u32,
    character_a_mood: CharacterMood,
    character_b_mood: CharacterMood,
    character_a_name: String,
    character_b_name: String,
    turns: Vec<Turn>,
    ended: bool,
    end_reason: Option<String>,
}

impl EventState {
    pub(super) fn new(
        config: &EventConfig,
        character_a_name: impl Into<String>,
        character_b_name: impl Into<String>,
    ) -> Self {
        Self {
            turn_counter: 0,
            character_a_mood: config.character_a_mood,
            character_b_mood: config.character_b_mood,
            character_a_name: character_a_name.into(),
            character_b_name: character_b_name.into(),
            turns: Vec::new(),
            ended: false,
            end_reason: None,
        }
    }

    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    pub fn mood(&self, participant: Participant) -> CharacterMood {
        match participant {
            Participant::A => self.character_a_mood,
            Participant::B => self.character_b_mood,
        }
    }

    pub fn name(&self, participant: Participant) -> &str {
        match participant {
            Participant::A => &self.character_a_name,
            Participant::B => &self.character_b_name,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn end_reason(&self) -> Option<&str> {
        self.end_reason.as_deref()
    }

    /// Turns still required before the event may end.
    pub fn remaining_interactions(&self, config: &EventConfig) -> u32 {
        config.min_interactions.saturating_sub(self.turn_counter)
    }

    pub(super) fn set_moods(&mut self, character_a: CharacterMood, character_b: CharacterMood) {
        self.character_a_mood = character_a;
        self.character_b_mood = character_b;
    }

    /// Append the next turn. Numbering must continue the log and the log may
    /// never grow past `max_interactions`.
    pub(super) fn append_turn(&mut self, turn: Turn, max_interactions: u32) -> Result<(), EventError> {
        if self.ended {
            return Err(EventError::bound_violation(format!(
                "turn {} appended after the event ended",
                turn.turn_number
            )));
        }
        if self.turn_counter >= max_interactions {
            return Err(EventError::bound_violation(format!(
                "turn {} would exceed max_interactions ({})",
                turn.turn_number, max_interactions
            )));
        }
        if turn.turn_number != self.turn_counter + 1 {
            return Err(EventError::bound_violation(format!(
                "turn {} appended where turn {} was expected",
                turn.turn_number,
                self.turn_counter + 1
            )));
        }
        self.turns.push(turn);
        self.turn_counter += 1;
        Ok(())
    }

    pub(super) fn end(&mut self, reason: Option<String>) {
        self.ended = true;
        self.end_reason = reason;
    }

    pub(super) fn into_parts(self) -> (Vec<Turn>, Option<String>) {
        (self.turns, self.end_reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use villagesim_domain::{CharacterId, EventType};

    fn config() -> EventConfig {
        EventConfig::new(
            EventType::Trade,
            "Haggling over a cart of pumpkins",
            "market square",
            CharacterId::new(),
            CharacterId::new(),
        )
        .with_bounds(2, 3)
        .with_initial_moods(CharacterMood::Confident, CharacterMood::Suspicious)
    }

    fn turn(config: &EventConfig, n: u32) -> Turn {
        Turn::new(
            n,
            config.character_a_id,
            "Mara",
            Some("Two coppers each.".into()),
            None,
            CharacterMood::Confident,
            0,
        )
        .expect("valid turn")
    }

    #[test]
    fn starts_from_config_moods() {
        let config = config();
        let state = EventState::new(&config, "Mara", "Tobin");

        assert_eq!(state.turn_counter(), 0);
        assert_eq!(state.mood(Participant::A), CharacterMood::Confident);
        assert_eq!(state.mood(Participant::B), CharacterMood::Suspicious);
        assert_eq!(state.name(Participant::B), "Tobin");
        assert_eq!(state.remaining_interactions(&config), 2);
    }

    #[test]
    fn append_counts_turns() {
        let config = config();
        let mut state = EventState::new(&config, "Mara", "Tobin");

        state.append_turn(turn(&config, 1), 3).expect("append");
        state.append_turn(turn(&config, 2), 3).expect("append");

        assert_eq!(state.turn_counter(), 2);
        assert_eq!(state.remaining_interactions(&config), 0);
        assert_eq!(state.last_turn().map(|t| t.turn_number), Some(2));
    }

    #[test]
    fn rejects_out_of_order_turn() {
        let config = config();
        let mut state = EventState::new(&config, "Mara", "Tobin");

        let err = state.append_turn(turn(&config, 2), 3).unwrap_err();

        assert!(matches!(err, EventError::BoundViolation(_)));
        assert!(state.turns().is_empty());
    }

    #[test]
    fn rejects_turn_past_max() {
        let config = config();
        let mut state = EventState::new(&config, "Mara", "Tobin");
        for n in 1..=3 {
            state.append_turn(turn(&config, n), 3).expect("append");
        }

        let err = state.append_turn(turn(&config, 4), 3).unwrap_err();

        assert!(matches!(err, EventError::BoundViolation(_)));
        assert_eq!(state.turn_counter(), 3);
    }

    #[test]
    fn rejects_turn_after_end() {
        let config = config();
        let mut state = EventState::new(&config, "Mara", "Tobin");
        state.end(Some("walked off".into()));

        assert!(state.append_turn(turn(&config, 1), 3).is_err());
        assert!(state.is_ended());
        assert_eq!(state.end_reason(), Some("walked off"));
    }
}
