//! Generation capabilities consumed by the event driver.
//!
//! The driver owns control flow and bookkeeping. Everything non-deterministic
//! (deciding, speaking, summarising) sits behind these three traits so the
//! driver can be exercised with scripted fakes and the LLM can be swapped out.

use std::time::Duration;

use async_trait::async_trait;
use villagesim_domain::{
    CharacterId, CharacterMood, CharacterProfile, ClosingSummary, CounterpartView, EventConfig,
    Turn,
};

use super::state::EventState;
use crate::infrastructure::ports::LlmError;

/// What the supervisor wants to happen after the latest turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorDecision {
    pub should_continue: bool,
    /// `None` lets the driver alternate from the last speaker
    pub next_speaker: Option<CharacterId>,
    pub character_a_mood: CharacterMood,
    pub character_b_mood: CharacterMood,
    pub end_reason: Option<String>,
}

impl SupervisorDecision {
    pub fn continue_with(
        next_speaker: Option<CharacterId>,
        character_a_mood: CharacterMood,
        character_b_mood: CharacterMood,
    ) -> Self {
        Self {
            should_continue: true,
            next_speaker,
            character_a_mood,
            character_b_mood,
            end_reason: None,
        }
    }

    pub fn end(
        reason: impl Into<String>,
        character_a_mood: CharacterMood,
        character_b_mood: CharacterMood,
    ) -> Self {
        Self {
            should_continue: false,
            next_speaker: None,
            character_a_mood,
            character_b_mood,
            end_reason: Some(reason.into()),
        }
    }
}

/// One character's raw contribution before it becomes a [`Turn`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterResponse {
    pub dialogue: Option<String>,
    pub action: Option<String>,
}

impl CharacterResponse {
    pub fn dialogue(text: impl Into<String>) -> Self {
        Self {
            dialogue: Some(text.into()),
            action: None,
        }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self {
            dialogue: None,
            action: Some(text.into()),
        }
    }
}

/// Everything a speaking character is allowed to see.
///
/// The counterpart only appears through its public view; their mood and
/// private profile never reach the responder.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub config: EventConfig,
    pub speaker: CharacterProfile,
    pub speaker_mood: CharacterMood,
    pub counterpart: CounterpartView,
    pub history: Vec<Turn>,
    pub turn_number: u32,
    pub remaining_interactions: u32,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
    #[error("response had neither dialogue nor action")]
    EmptyResponse,
    #[error("next speaker '{0}' is not a participant")]
    InvalidSpeaker(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GenerationError {
    pub fn malformed(message: impl ToString) -> Self {
        Self::Malformed(message.to_string())
    }
}

#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn decide(
        &self,
        state: &EventState,
        config: &EventConfig,
    ) -> Result<SupervisorDecision, GenerationError>;
}

#[async_trait]
pub trait CharacterResponder: Send + Sync {
    async fn respond(&self, context: &ResponseContext)
        -> Result<CharacterResponse, GenerationError>;
}

#[async_trait]
pub trait Finalizer: Send + Sync {
    /// `state` holds the finished turn log and both participants' names.
    async fn finalize(
        &self,
        state: &EventState,
        config: &EventConfig,
    ) -> Result<ClosingSummary, GenerationError>;
}
