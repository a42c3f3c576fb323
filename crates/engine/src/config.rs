//! Engine configuration from environment variables.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use crate::infrastructure::resilient_llm::RetryConfig;
use crate::use_cases::event::{DriverPolicy, FirstSpeaker, LlmSettings};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub ollama_base_url: String,
    pub ollama_model: String,
    /// Transport-level retries inside the LLM client
    pub llm_retry: RetryConfig,
    pub llm: LlmSettings,
    pub driver: DriverPolicy,
    pub characters_dir: PathBuf,
    pub events_dir: PathBuf,
    /// Event request the binary runs, as JSON
    pub request_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            llm_retry: RetryConfig::default(),
            llm: LlmSettings::default(),
            driver: DriverPolicy::default(),
            characters_dir: PathBuf::from("data/characters"),
            events_dir: PathBuf::from("data/events"),
            request_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let ollama_base_url = get("OLLAMA_URL")
            .or_else(|| get("OLLAMA_BASE_URL"))
            .unwrap_or(defaults.ollama_base_url);
        let ollama_model = get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model);

        let llm_retry = RetryConfig {
            max_retries: parse_or(get("LLM_MAX_RETRIES"), "LLM_MAX_RETRIES", defaults.llm_retry.max_retries),
            base_delay_ms: parse_or(
                get("LLM_BASE_DELAY_MS"),
                "LLM_BASE_DELAY_MS",
                defaults.llm_retry.base_delay_ms,
            ),
            ..defaults.llm_retry
        };

        let llm = LlmSettings {
            temperature: parse_or(get("LLM_TEMPERATURE"), "LLM_TEMPERATURE", defaults.llm.temperature),
            ..defaults.llm
        };

        let max_attempts: u32 = parse_or(
            get("EVENT_MAX_ATTEMPTS"),
            "EVENT_MAX_ATTEMPTS",
            defaults.driver.max_attempts(),
        );
        let call_timeout_secs: u64 = parse_or(
            get("EVENT_CALL_TIMEOUT_SECS"),
            "EVENT_CALL_TIMEOUT_SECS",
            defaults.driver.call_timeout.as_secs(),
        );
        let first_speaker: FirstSpeaker = parse_or(
            get("EVENT_FIRST_SPEAKER"),
            "EVENT_FIRST_SPEAKER",
            defaults.driver.first_speaker,
        );
        let driver = DriverPolicy {
            retry: RetryConfig {
                max_retries: max_attempts.max(1) - 1,
                ..defaults.driver.retry
            },
            call_timeout: Duration::from_secs(call_timeout_secs.max(1)),
            first_speaker,
        };

        Self {
            ollama_base_url,
            ollama_model,
            llm_retry,
            llm,
            driver,
            characters_dir: get("CHARACTERS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.characters_dir),
            events_dir: get("EVENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.events_dir),
            request_path: get("EVENT_REQUEST_PATH").map(PathBuf::from),
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = value else {
        return default;
    };
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!(
            key,
            value = %raw,
            default = %default,
            error = %e,
            "Invalid configuration value, using default"
        );
        default
    })
}
