use villagesim_domain::{CharacterId, DomainError};

use super::capabilities::GenerationError;
use crate::infrastructure::ports::RepoError;

/// Why an event run produced no transcript.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Invalid event configuration: {0}")]
    Configuration(#[source] DomainError),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("{operation} failed after {attempts} attempt(s): {source}")]
    Generation {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: GenerationError,
    },
    #[error("Bound violation: {0}")]
    BoundViolation(String),
    #[error("Event cancelled after {completed_turns} turn(s)")]
    Cancelled { completed_turns: u32 },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl EventError {
    pub fn bound_violation(message: impl Into<String>) -> Self {
        Self::BoundViolation(message.into())
    }

    /// The caller asked for something that can never succeed as given.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::CharacterNotFound(_))
    }
}
