//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EventRepo, LlmPort};
use crate::use_cases;
use crate::use_cases::event::{
    DeleteEvent, DriverPolicy, EventDriver, GenerateEvent, GetEvent, ListEvents,
    LlmCharacterResponder, LlmFinalizer, LlmSettings, LlmSupervisor,
};

/// Main application state.
///
/// Holds the repositories and use cases wired against one LLM client.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub event: Arc<dyn EventRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub event: use_cases::EventUseCases,
}

impl App {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        events: Arc<dyn EventRepo>,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        llm_settings: LlmSettings,
        policy: DriverPolicy,
    ) -> Self {
        let driver = Arc::new(EventDriver::new(
            characters.clone(),
            Arc::new(LlmSupervisor::new(llm.clone(), llm_settings)),
            Arc::new(LlmCharacterResponder::new(llm.clone(), llm_settings)),
            Arc::new(LlmFinalizer::new(llm, llm_settings)),
            policy,
        ));

        let event = use_cases::EventUseCases::new(
            Arc::new(GenerateEvent::new(driver, events.clone(), clock)),
            Arc::new(ListEvents::new(events.clone())),
            Arc::new(GetEvent::new(events.clone())),
            Arc::new(DeleteEvent::new(events.clone())),
        );

        Self {
            repositories: Repositories {
                character: characters,
                event: events,
            },
            use_cases: UseCases { event },
        }
    }
}
