//! Scripted capabilities for driving events in tests.
//!
//! Each fake passes its zero-based call index to a script closure, so tests
//! can make the n-th call misbehave.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use villagesim_domain::{ClosingSummary, EventConfig, Participant};

use crate::use_cases::event::{
    CharacterResponder, CharacterResponse, EventState, Finalizer, GenerationError,
    ResponseContext, Supervisor, SupervisorDecision,
};

type DecideScript =
    dyn Fn(u32, &EventState, &EventConfig) -> Result<SupervisorDecision, GenerationError>
        + Send
        + Sync;

pub struct ScriptedSupervisor {
    calls: AtomicU32,
    script: Box<DecideScript>,
}

impl ScriptedSupervisor {
    pub fn new(
        script: impl Fn(u32, &EventState, &EventConfig) -> Result<SupervisorDecision, GenerationError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            calls: AtomicU32::new(0),
            script: Box::new(script),
        }
    }

    /// Keeps current moods and never picks a speaker.
    pub fn always_continue() -> Self {
        Self::new(|_, state, _| {
            Ok(SupervisorDecision::continue_with(
                None,
                state.mood(Participant::A),
                state.mood(Participant::B),
            ))
        })
    }

    /// Asks to end from the very first decision.
    pub fn always_end() -> Self {
        Self::new(|_, state, _| {
            Ok(SupervisorDecision::end(
                "they part ways",
                state.mood(Participant::A),
                state.mood(Participant::B),
            ))
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Supervisor for ScriptedSupervisor {
    async fn decide(
        &self,
        state: &EventState,
        config: &EventConfig,
    ) -> Result<SupervisorDecision, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(call, state, config)
    }
}

type RespondScript =
    dyn Fn(u32, &ResponseContext) -> Result<CharacterResponse, GenerationError> + Send + Sync;

pub struct ScriptedResponder {
    calls: AtomicU32,
    delay: Option<Duration>,
    contexts: Mutex<Vec<ResponseContext>>,
    script: Box<RespondScript>,
}

impl ScriptedResponder {
    pub fn new(
        script: impl Fn(u32, &ResponseContext) -> Result<CharacterResponse, GenerationError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            calls: AtomicU32::new(0),
            delay: None,
            contexts: Mutex::new(Vec::new()),
            script: Box::new(script),
        }
    }

    /// Says a line naming the speaker and the turn.
    pub fn echo() -> Self {
        Self::new(|_, context| {
            Ok(CharacterResponse::dialogue(format!(
                "{} speaks on turn {}",
                context.speaker.name, context.turn_number
            )))
        })
    }

    /// Sleep before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Contexts of the calls that produced an answer.
    pub fn contexts(&self) -> Vec<ResponseContext> {
        self.contexts.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CharacterResponder for ScriptedResponder {
    async fn respond(
        &self,
        context: &ResponseContext,
    ) -> Result<CharacterResponse, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let response = (self.script)(call, context)?;
        self.contexts.lock().expect("lock").push(context.clone());
        Ok(response)
    }
}

type FinalizeScript =
    dyn Fn(u32, &EventState) -> Result<ClosingSummary, GenerationError> + Send + Sync;

pub struct ScriptedFinalizer {
    calls: AtomicU32,
    seen_turns: Mutex<Vec<usize>>,
    seen_names: Mutex<Vec<(String, String)>>,
    script: Box<FinalizeScript>,
}

impl ScriptedFinalizer {
    /// Summarises by counting turns.
    pub fn new() -> Self {
        Self::scripted(|_, state| {
            Ok(ClosingSummary::new(
                format!("{} turns were exchanged.", state.turns().len()),
                "Nothing was settled.",
            ))
        })
    }

    pub fn scripted(
        script: impl Fn(u32, &EventState) -> Result<ClosingSummary, GenerationError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            calls: AtomicU32::new(0),
            seen_turns: Mutex::new(Vec::new()),
            seen_names: Mutex::new(Vec::new()),
            script: Box::new(script),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Turn count seen by every call, failed ones included.
    pub fn seen_turns(&self) -> Vec<usize> {
        self.seen_turns.lock().expect("lock").clone()
    }

    /// Participant names seen by every call, as `(a, b)`.
    pub fn seen_names(&self) -> Vec<(String, String)> {
        self.seen_names.lock().expect("lock").clone()
    }
}

impl Default for ScriptedFinalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Finalizer for ScriptedFinalizer {
    async fn finalize(
        &self,
        state: &EventState,
        _config: &EventConfig,
    ) -> Result<ClosingSummary, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_turns.lock().expect("lock").push(state.turns().len());
        self.seen_names.lock().expect("lock").push((
            state.name(Participant::A).to_string(),
            state.name(Participant::B).to_string(),
        ));
        (self.script)(call, state)
    }
}
