//! Generate event use case.
//!
//! Runs the event driver and persists the result as an [`EventRecord`].
//! Failed or cancelled runs store nothing.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use villagesim_domain::{EventConfig, EventId, EventRecord};

use super::driver::EventDriver;
use super::error::EventError;
use crate::infrastructure::ports::{ClockPort, EventRepo};

pub struct GenerateEvent {
    driver: Arc<EventDriver>,
    events: Arc<dyn EventRepo>,
    clock: Arc<dyn ClockPort>,
}

impl GenerateEvent {
    pub fn new(
        driver: Arc<EventDriver>,
        events: Arc<dyn EventRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            driver,
            events,
            clock,
        }
    }

    pub async fn execute(&self, config: EventConfig) -> Result<EventRecord, EventError> {
        self.execute_with_cancellation(config, &CancellationToken::new())
            .await
    }

    pub async fn execute_with_cancellation(
        &self,
        mut config: EventConfig,
        cancel: &CancellationToken,
    ) -> Result<EventRecord, EventError> {
        if config.timestamp.is_none() {
            config.timestamp = Some(self.clock.now());
        }

        let started = Instant::now();
        let transcript = self
            .driver
            .run_event_with_cancellation(&config, cancel)
            .await?;
        let generation_time_ms = started.elapsed().as_millis() as u64;

        let record = EventRecord::new(
            EventId::new(),
            config,
            transcript,
            self.clock.now(),
            generation_time_ms,
        );
        self.events.save(&record).await?;

        tracing::info!(
            event_id = %record.id,
            event_type = %record.config.event_type,
            turns = record.transcript.turn_count(),
            generation_time_ms,
            "Event generated and saved"
        );
        Ok(record)
    }
}
