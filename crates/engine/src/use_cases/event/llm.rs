//! LLM-backed event capabilities.
//!
//! Each capability builds a prompt, asks the model for a JSON object, and maps
//! the reply onto the capability contract. Transport failures come back as
//! [`GenerationError::Llm`], unusable replies as [`GenerationError::Malformed`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use villagesim_domain::{CharacterMood, ClosingSummary, EventConfig, Participant};

use super::capabilities::{
    CharacterResponder, CharacterResponse, Finalizer, GenerationError, ResponseContext,
    Supervisor, SupervisorDecision,
};
use super::prompts;
use super::response_parser::parse_json_reply;
use super::state::EventState;
use crate::infrastructure::ports::{ChatMessage, FinishReason, LlmPort, LlmRequest};

/// Sampling settings shared by the three capabilities.
#[derive(Debug, Clone, Copy)]
pub struct LlmSettings {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: Some(1024),
        }
    }
}

async fn ask_json(
    llm: &dyn LlmPort,
    settings: LlmSettings,
    system_prompt: &str,
    prompt: String,
) -> Result<String, GenerationError> {
    let request = LlmRequest::new(vec![ChatMessage::user(prompt)])
        .with_system_prompt(system_prompt)
        .with_temperature(settings.temperature)
        .with_max_tokens(settings.max_tokens)
        .with_json_output();

    let response = llm.generate(request).await?;
    if response.finish_reason == FinishReason::Length {
        tracing::warn!("LLM reply was cut off at the token limit");
    }
    if response.content.trim().is_empty() {
        return Err(GenerationError::malformed("empty reply"));
    }
    Ok(response.content)
}

// =============================================================================
// Supervisor
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawDecision {
    should_continue: bool,
    #[serde(default)]
    next_speaker: Option<String>,
    #[serde(default)]
    character_a_mood: Option<String>,
    #[serde(default)]
    character_b_mood: Option<String>,
    #[serde(default)]
    end_reason: Option<String>,
}

pub struct LlmSupervisor {
    llm: Arc<dyn LlmPort>,
    settings: LlmSettings,
}

impl LlmSupervisor {
    pub fn new(llm: Arc<dyn LlmPort>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }
}

#[async_trait]
impl Supervisor for LlmSupervisor {
    async fn decide(
        &self,
        state: &EventState,
        config: &EventConfig,
    ) -> Result<SupervisorDecision, GenerationError> {
        let content = ask_json(
            self.llm.as_ref(),
            self.settings,
            prompts::SUPERVISOR_SYSTEM_PROMPT,
            prompts::supervisor_prompt(state, config),
        )
        .await?;
        let raw: RawDecision = parse_json_reply(&content)?;
        to_decision(raw, state, config)
    }
}

fn to_decision(
    raw: RawDecision,
    state: &EventState,
    config: &EventConfig,
) -> Result<SupervisorDecision, GenerationError> {
    let next_speaker = match raw.next_speaker.as_deref().map(str::trim) {
        None | Some("") | Some("null") => None,
        Some(label) => {
            let participant = Participant::from_label(label)
                .or_else(|| {
                    [Participant::A, Participant::B]
                        .into_iter()
                        .find(|p| state.name(*p).eq_ignore_ascii_case(label))
                })
                .ok_or_else(|| GenerationError::InvalidSpeaker(label.to_string()))?;
            Some(config.character_id(participant))
        }
    };

    Ok(SupervisorDecision {
        should_continue: raw.should_continue,
        next_speaker,
        character_a_mood: mood_or_current(raw.character_a_mood, state, Participant::A),
        character_b_mood: mood_or_current(raw.character_b_mood, state, Participant::B),
        end_reason: raw.end_reason.filter(|r| !r.trim().is_empty()),
    })
}

/// Unknown or missing moods keep the character's current mood.
fn mood_or_current(raw: Option<String>, state: &EventState, participant: Participant) -> CharacterMood {
    let current = state.mood(participant);
    match raw {
        None => current,
        Some(text) => text.parse().unwrap_or_else(|_| {
            tracing::warn!(
                participant = %participant,
                mood = %text,
                "Supervisor returned an unknown mood; keeping current mood"
            );
            current
        }),
    }
}

// =============================================================================
// Character responder
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    dialogue: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

pub struct LlmCharacterResponder {
    llm: Arc<dyn LlmPort>,
    settings: LlmSettings,
}

impl LlmCharacterResponder {
    pub fn new(llm: Arc<dyn LlmPort>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }
}

#[async_trait]
impl CharacterResponder for LlmCharacterResponder {
    async fn respond(
        &self,
        context: &ResponseContext,
    ) -> Result<CharacterResponse, GenerationError> {
        let content = ask_json(
            self.llm.as_ref(),
            self.settings,
            prompts::EVENT_SYSTEM_PROMPT,
            prompts::character_prompt(context),
        )
        .await?;
        let raw: RawResponse = parse_json_reply(&content)?;
        Ok(CharacterResponse {
            dialogue: raw.dialogue,
            action: raw.action,
        })
    }
}

// =============================================================================
// Finalizer
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawSummary {
    summary: String,
    #[serde(default)]
    outcome: String,
}

pub struct LlmFinalizer {
    llm: Arc<dyn LlmPort>,
    settings: LlmSettings,
}

impl LlmFinalizer {
    pub fn new(llm: Arc<dyn LlmPort>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }
}

#[async_trait]
impl Finalizer for LlmFinalizer {
    async fn finalize(
        &self,
        state: &EventState,
        config: &EventConfig,
    ) -> Result<ClosingSummary, GenerationError> {
        let content = ask_json(
            self.llm.as_ref(),
            self.settings,
            prompts::SUMMARY_SYSTEM_PROMPT,
            prompts::summary_prompt(state, config),
        )
        .await?;
        let raw: RawSummary = parse_json_reply(&content)?;
        Ok(ClosingSummary::new(raw.summary.trim(), raw.outcome.trim()))
    }
}
