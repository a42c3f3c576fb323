//! Infrastructure - External dependency implementations.
//!
//! Contains port traits and their adapters:
//! - `ports` - Trait definitions for external dependencies
//! - `json_store` - JSON file repositories for characters and events
//! - `ollama` - Ollama LLM client (OpenAI-compatible API)
//! - `resilient_llm` - Retry wrapper for any LLM client
//! - `clock` - System clock

pub mod clock;
pub mod json_store;
pub mod ollama;
pub mod ports;
pub mod resilient_llm;
