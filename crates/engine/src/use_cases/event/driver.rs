//! Event driver: the turn-taking state machine.
//!
//! ```text
//! START -> DECIDING -> RESPONDING -> DECIDING -> ... -> FINALIZING -> DONE
//! ```
//!
//! START validates the config and loads both profiles. DECIDING asks the
//! supervisor what happens next and applies the hard interaction bounds.
//! RESPONDING asks the chosen character for a turn and appends it. FINALIZING
//! requests the closing summary, and DONE assembles the transcript from the
//! consumed state.
//!
//! The driver never performs more than `max_interactions` RESPONDING
//! transitions regardless of what the supervisor returns.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use villagesim_domain::{
    CharacterId, CharacterProfile, DomainError, EventConfig, Participant, Transcript, Turn,
};

use super::capabilities::{
    CharacterResponder, Finalizer, GenerationError, ResponseContext, Supervisor,
    SupervisorDecision,
};
use super::error::EventError;
use super::state::EventState;
use crate::infrastructure::ports::CharacterRepo;
use crate::infrastructure::resilient_llm::RetryConfig;

/// End reason recorded when the driver stops an event the supervisor wanted
/// to continue.
pub const MAX_INTERACTIONS_REASON: &str = "reached maximum interactions";

/// Who takes the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstSpeaker {
    /// Character A always opens; the supervisor's first pick is ignored
    #[default]
    CharacterA,
    /// Honor the supervisor's first pick
    Supervisor,
}

impl fmt::Display for FirstSpeaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CharacterA => "character_a",
            Self::Supervisor => "supervisor",
        })
    }
}

impl FromStr for FirstSpeaker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character_a" | "a" => Ok(Self::CharacterA),
            "supervisor" => Ok(Self::Supervisor),
            other => Err(DomainError::parse(format!("Unknown first speaker policy: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriverPolicy {
    /// Backoff between attempts of a single capability call.
    /// A call is tried `retry.max_retries + 1` times.
    pub retry: RetryConfig,
    /// Upper bound on each capability call
    pub call_timeout: Duration,
    pub first_speaker: FirstSpeaker,
}

impl Default for DriverPolicy {
    fn default() -> Self {
        Self {
            retry: RetryConfig {
                max_retries: 2,
                base_delay_ms: 500,
                max_delay_ms: 8_000,
                jitter_factor: 0.2,
            },
            call_timeout: Duration::from_secs(120),
            first_speaker: FirstSpeaker::default(),
        }
    }
}

impl DriverPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retry.max_retries.saturating_add(1)
    }
}

enum Phase {
    Deciding,
    Responding(Participant),
    Finalizing,
}

/// What the bounds allow after a supervisor decision.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    End(Option<String>),
}

struct Cast {
    character_a: CharacterProfile,
    character_b: CharacterProfile,
}

impl Cast {
    fn profile(&self, participant: Participant) -> &CharacterProfile {
        match participant {
            Participant::A => &self.character_a,
            Participant::B => &self.character_b,
        }
    }
}

/// Runs events between two characters.
pub struct EventDriver {
    characters: Arc<dyn CharacterRepo>,
    supervisor: Arc<dyn Supervisor>,
    responder: Arc<dyn CharacterResponder>,
    finalizer: Arc<dyn Finalizer>,
    policy: DriverPolicy,
}

impl EventDriver {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        supervisor: Arc<dyn Supervisor>,
        responder: Arc<dyn CharacterResponder>,
        finalizer: Arc<dyn Finalizer>,
        policy: DriverPolicy,
    ) -> Self {
        Self {
            characters,
            supervisor,
            responder,
            finalizer,
            policy,
        }
    }

    pub fn policy(&self) -> &DriverPolicy {
        &self.policy
    }

    pub async fn run_event(&self, config: &EventConfig) -> Result<Transcript, EventError> {
        self.run_event_with_cancellation(config, &CancellationToken::new())
            .await
    }

    /// Run an event, stopping between transitions once `cancel` fires.
    ///
    /// A cancelled run yields [`EventError::Cancelled`] and no transcript.
    pub async fn run_event_with_cancellation(
        &self,
        config: &EventConfig,
        cancel: &CancellationToken,
    ) -> Result<Transcript, EventError> {
        config.validate().map_err(EventError::Configuration)?;
        let cast = self.load_cast(config).await?;
        let mut state = EventState::new(config, &cast.character_a.name, &cast.character_b.name);

        tracing::info!(
            event_type = %config.event_type,
            character_a = %cast.character_a.name,
            character_b = %cast.character_b.name,
            min_interactions = config.min_interactions,
            max_interactions = config.max_interactions,
            "Starting event"
        );

        let mut phase = Phase::Deciding;
        let mut responding_transitions = 0u32;
        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(&state));
            }
            phase = match phase {
                Phase::Deciding => self.decide(config, &mut state, cancel).await?,
                Phase::Responding(speaker) => {
                    if responding_transitions >= config.max_interactions {
                        tracing::error!(
                            responding_transitions,
                            max_interactions = config.max_interactions,
                            "Refusing to generate a turn beyond max_interactions"
                        );
                        return Err(EventError::bound_violation(format!(
                            "attempted turn {} with max_interactions {}",
                            responding_transitions + 1,
                            config.max_interactions
                        )));
                    }
                    responding_transitions += 1;
                    self.respond(config, &cast, &mut state, speaker, cancel)
                        .await?
                }
                Phase::Finalizing => break,
            };
        }

        let finished: &EventState = &state;
        let closing = self
            .call_with_retry("finalizer", state.turn_counter(), cancel, || async move {
                let closing = self.finalizer.finalize(finished, config).await?;
                if closing.summary.trim().is_empty() {
                    return Err(GenerationError::malformed("empty summary"));
                }
                Ok(closing)
            })
            .await?;

        let (turns, end_reason) = state.into_parts();
        let transcript = Transcript::assemble(config, turns, closing, end_reason).map_err(|e| {
            tracing::error!(error = %e, "Assembled transcript breaks structural rules");
            EventError::bound_violation(e.to_string())
        })?;

        tracing::info!(
            turns = transcript.turn_count(),
            character_a_final_mood = %transcript.character_a_final_mood,
            character_b_final_mood = %transcript.character_b_final_mood,
            end_reason = transcript.end_reason.as_deref().unwrap_or("-"),
            "Event complete"
        );
        Ok(transcript)
    }

    async fn load_cast(&self, config: &EventConfig) -> Result<Cast, EventError> {
        Ok(Cast {
            character_a: self.load_character(config.character_a_id).await?,
            character_b: self.load_character(config.character_b_id).await?,
        })
    }

    async fn load_character(&self, id: CharacterId) -> Result<CharacterProfile, EventError> {
        self.characters
            .get(id)
            .await?
            .ok_or(EventError::CharacterNotFound(id))
    }

    async fn decide(
        &self,
        config: &EventConfig,
        state: &mut EventState,
        cancel: &CancellationToken,
    ) -> Result<Phase, EventError> {
        let turn_counter = state.turn_counter();
        let view: &EventState = state;
        let decision = self
            .call_with_retry("supervisor", turn_counter, cancel, || async move {
                let decision = self.supervisor.decide(view, config).await?;
                if let Some(id) = decision.next_speaker {
                    if config.participant(id).is_none() {
                        return Err(GenerationError::InvalidSpeaker(id.to_string()));
                    }
                }
                Ok(decision)
            })
            .await?;

        state.set_moods(decision.character_a_mood, decision.character_b_mood);

        match enforce_bounds(config, turn_counter, &decision) {
            Flow::End(reason) => {
                tracing::debug!(
                    turn = turn_counter,
                    reason = reason.as_deref().unwrap_or("-"),
                    "Supervisor closed the event"
                );
                state.end(reason);
                Ok(Phase::Finalizing)
            }
            Flow::Continue => {
                let speaker = self.pick_speaker(config, state, decision.next_speaker);
                Ok(Phase::Responding(speaker))
            }
        }
    }

    fn pick_speaker(
        &self,
        config: &EventConfig,
        state: &EventState,
        requested: Option<CharacterId>,
    ) -> Participant {
        let requested = requested.and_then(|id| config.participant(id));

        if state.turns().is_empty() && self.policy.first_speaker == FirstSpeaker::CharacterA {
            if requested == Some(Participant::B) {
                tracing::debug!("Supervisor picked character B to open; character A opens");
            }
            return Participant::A;
        }

        requested.unwrap_or_else(|| {
            state
                .last_turn()
                .and_then(|turn| config.participant(turn.speaker_id))
                .map(Participant::other)
                .unwrap_or(Participant::A)
        })
    }

    async fn respond(
        &self,
        config: &EventConfig,
        cast: &Cast,
        state: &mut EventState,
        speaker: Participant,
        cancel: &CancellationToken,
    ) -> Result<Phase, EventError> {
        let context = ResponseContext {
            config: config.clone(),
            speaker: cast.profile(speaker).clone(),
            speaker_mood: state.mood(speaker),
            counterpart: cast.profile(speaker.other()).public_view(),
            history: state.turns().to_vec(),
            turn_number: state.turn_counter() + 1,
            remaining_interactions: state.remaining_interactions(config),
        };
        let context = &context;

        let turn = self
            .call_with_retry(
                "character_response",
                state.turn_counter(),
                cancel,
                || async move {
                    let response = self.responder.respond(context).await?;
                    Turn::new(
                        context.turn_number,
                        context.speaker.id,
                        context.speaker.name.clone(),
                        response.dialogue,
                        response.action,
                        context.speaker_mood,
                        context.remaining_interactions,
                    )
                    .map_err(|_| GenerationError::EmptyResponse)
                },
            )
            .await?;

        tracing::debug!(
            turn = turn.turn_number,
            speaker = %turn.speaker_name,
            mood = %turn.mood,
            "Turn accepted"
        );

        state
            .append_turn(turn, config.max_interactions)
            .inspect_err(|e| tracing::error!(error = %e, "Turn rejected by event state"))?;
        Ok(Phase::Deciding)
    }

    /// Run one capability call with a timeout, retrying failures with backoff.
    ///
    /// Cancellation is observed while waiting between attempts, never in the
    /// middle of a call.
    async fn call_with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        completed_turns: u32,
        cancel: &CancellationToken,
        mut call: F,
    ) -> Result<T, EventError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match tokio::time::timeout(self.policy.call_timeout, call()).await {
                Ok(Ok(value)) => {
                    if attempt > 1 {
                        tracing::info!(operation, attempt, "Generation succeeded after retry");
                    }
                    return Ok(value);
                }
                Ok(Err(e)) => e,
                Err(_) => GenerationError::Timeout(self.policy.call_timeout),
            };

            if attempt >= max_attempts {
                tracing::error!(
                    operation,
                    attempts = attempt,
                    error = %error,
                    "Generation failed after all attempts"
                );
                return Err(EventError::Generation {
                    operation,
                    attempts: attempt,
                    source: error,
                });
            }

            let delay = self.policy.retry.delay_for(attempt);
            tracing::warn!(
                operation,
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Generation attempt failed, retrying"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(EventError::Cancelled { completed_turns }),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

fn cancelled(state: &EventState) -> EventError {
    tracing::info!(completed_turns = state.turn_counter(), "Event cancelled");
    EventError::Cancelled {
        completed_turns: state.turn_counter(),
    }
}

/// Below `min` the event always continues; at `max` it always ends.
fn enforce_bounds(config: &EventConfig, turn_counter: u32, decision: &SupervisorDecision) -> Flow {
    if turn_counter >= config.max_interactions {
        if decision.should_continue {
            tracing::info!(
                turn = turn_counter,
                "Supervisor wanted to continue at max_interactions; ending event"
            );
        }
        return Flow::End(
            decision
                .end_reason
                .clone()
                .filter(|_| !decision.should_continue)
                .or_else(|| Some(MAX_INTERACTIONS_REASON.to_string())),
        );
    }

    if turn_counter < config.min_interactions {
        if !decision.should_continue {
            tracing::debug!(
                turn = turn_counter,
                min_interactions = config.min_interactions,
                "Supervisor wanted to end below min_interactions; continuing"
            );
        }
        return Flow::Continue;
    }

    if decision.should_continue {
        Flow::Continue
    } else {
        Flow::End(decision.end_reason.clone())
    }
}
