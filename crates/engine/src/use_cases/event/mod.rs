//! Event use cases.
//!
//! The generation flow is:
//! 1. The caller builds an `EventConfig` (GenerateEvent)
//! 2. The driver alternates supervisor decisions and character turns
//! 3. The finalizer writes the closing summary
//! 4. The transcript is stored as an `EventRecord`
//! 5. Stored events can be listed, read back and deleted

use std::sync::Arc;

mod capabilities;
mod driver;
mod error;
mod generate;
mod llm;
mod prompts;
mod queries;
mod response_parser;
mod state;

pub use capabilities::{
    CharacterResponder, CharacterResponse, Finalizer, GenerationError, ResponseContext,
    Supervisor, SupervisorDecision,
};
pub use driver::{DriverPolicy, EventDriver, FirstSpeaker, MAX_INTERACTIONS_REASON};
pub use error::EventError;
pub use generate::GenerateEvent;
pub use llm::{LlmCharacterResponder, LlmFinalizer, LlmSettings, LlmSupervisor};
pub use queries::{DeleteEvent, GetEvent, ListEvents};
pub use state::EventState;

/// Container for event use cases.
pub struct EventUseCases {
    pub generate: Arc<GenerateEvent>,
    pub list: Arc<ListEvents>,
    pub get: Arc<GetEvent>,
    pub delete: Arc<DeleteEvent>,
}

impl EventUseCases {
    pub fn new(
        generate: Arc<GenerateEvent>,
        list: Arc<ListEvents>,
        get: Arc<GetEvent>,
        delete: Arc<DeleteEvent>,
    ) -> Self {
        Self {
            generate,
            list,
            get,
            delete,
        }
    }
}
