use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Kind of interaction an event depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Argument,
    Fight,
    Stealing,
    Romance,
    Trade,
    Gossip,
    Help,
    Celebration,
    Confrontation,
    Reconciliation,
}

impl EventType {
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Argument,
            EventType::Fight,
            EventType::Stealing,
            EventType::Romance,
            EventType::Trade,
            EventType::Gossip,
            EventType::Help,
            EventType::Celebration,
            EventType::Confrontation,
            EventType::Reconciliation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Argument => "argument",
            EventType::Fight => "fight",
            EventType::Stealing => "stealing",
            EventType::Romance => "romance",
            EventType::Trade => "trade",
            EventType::Gossip => "gossip",
            EventType::Help => "help",
            EventType::Celebration => "celebration",
            EventType::Confrontation => "confrontation",
            EventType::Reconciliation => "reconciliation",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        EventType::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown event type: {}", s)))
    }
}
