//! VillageSim Engine - Main entry point.
//!
//! Runs one event request read from `EVENT_REQUEST_PATH` and stores the
//! transcript under `EVENTS_DIR`.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use villagesim_domain::{EventConfig, EventRecord};
use villagesim_engine::{
    config::EngineConfig,
    infrastructure::{
        clock::SystemClock,
        json_store::{JsonCharacterRepo, JsonEventRepo},
        ollama::OllamaClient,
        resilient_llm::ResilientLlmClient,
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (cargo runs the engine from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "villagesim_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VillageSim Engine");

    let config = EngineConfig::from_env();
    let request_path = config
        .request_path
        .clone()
        .context("EVENT_REQUEST_PATH is not set")?;

    // Create infrastructure clients
    let ollama_client = Arc::new(OllamaClient::new(
        &config.ollama_base_url,
        &config.ollama_model,
    ));
    tracing::info!(
        url = %config.ollama_base_url,
        model = %ollama_client.model(),
        max_retries = config.llm_retry.max_retries,
        base_delay_ms = config.llm_retry.base_delay_ms,
        "LLM client configured"
    );
    let llm = Arc::new(ResilientLlmClient::new(ollama_client, config.llm_retry.clone()));

    let app = App::new(
        Arc::new(JsonCharacterRepo::new(&config.characters_dir)),
        Arc::new(JsonEventRepo::new(&config.events_dir)),
        llm,
        Arc::new(SystemClock),
        config.llm,
        config.driver.clone(),
    );

    let raw = tokio::fs::read_to_string(&request_path)
        .await
        .with_context(|| format!("reading event request {}", request_path.display()))?;
    let request: EventConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing event request {}", request_path.display()))?;

    // Ctrl-C stops the event at the next turn boundary
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling event");
            on_signal.cancel();
        }
    });

    let record = app
        .use_cases
        .event
        .generate
        .execute_with_cancellation(request, &cancel)
        .await?;

    log_transcript(&record);
    tracing::info!(
        event_id = %record.id,
        dir = %config.events_dir.display(),
        "Event stored"
    );

    Ok(())
}

fn log_transcript(record: &EventRecord) {
    for turn in &record.transcript.turns {
        tracing::info!(
            "Turn {} {} {}: {}{}",
            turn.turn_number,
            turn.mood.emoji(),
            turn.speaker_name,
            turn.dialogue
                .as_deref()
                .map(|d| format!("\"{d}\" "))
                .unwrap_or_default(),
            turn.action
                .as_deref()
                .map(|a| format!("*{a}*"))
                .unwrap_or_default(),
        );
    }
    tracing::info!(
        turns = record.transcript.turn_count(),
        end_reason = record.transcript.end_reason.as_deref().unwrap_or("-"),
        character_a_final_mood = %record.transcript.character_a_final_mood,
        character_b_final_mood = %record.transcript.character_b_final_mood,
        generation_time_ms = record.generation_time_ms,
        "Summary: {}",
        record.transcript.summary
    );
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
