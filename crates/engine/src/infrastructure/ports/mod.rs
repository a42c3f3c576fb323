//! Port traits for infrastructure boundaries.
//!
//! These are the infrastructure abstractions in the engine. Ports exist for:
//! - Storage (could swap JSON files -> a database)
//! - LLM calls (could swap Ollama -> a hosted API)
//! - Clock (for testing)
//!
//! The event capabilities (supervisor, responder, finalizer) are use-case
//! level seams and live in `use_cases::event`.

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CharacterRepo, EventRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, LlmPort, LlmRequest, LlmResponse, MessageRole, TokenUsage,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCharacterRepo, MockEventRepo};

#[cfg(test)]
pub use external::MockLlmPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{LlmError, RepoError};
