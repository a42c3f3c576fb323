//! Character mood during an event
//!
//! A mood is attached to each character while an event runs. The supervisor
//! moves moods turn by turn; every recorded turn snapshots the speaker's mood.
//! Target moods use the same type but are advisory only.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional state of a character at a point in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterMood {
    /// Furious, ready to lash out
    Angry,
    /// Frightened, wants to get away
    Scared,
    /// Smitten with the other character
    InLove,
    /// Cheerful, positive
    Happy,
    /// Downcast, hurt
    Sad,
    /// Uneasy, jittery
    Nervous,
    /// Self-assured, certain
    Confident,
    /// Wary, distrustful
    Suspicious,
    /// Thankful, feels indebted
    Grateful,
    /// Envious of the other character
    Jealous,
    /// Baseline state
    #[default]
    Neutral,
}

impl CharacterMood {
    /// All moods in declaration order
    pub fn all() -> &'static [CharacterMood] {
        &[
            CharacterMood::Angry,
            CharacterMood::Scared,
            CharacterMood::InLove,
            CharacterMood::Happy,
            CharacterMood::Sad,
            CharacterMood::Nervous,
            CharacterMood::Confident,
            CharacterMood::Suspicious,
            CharacterMood::Grateful,
            CharacterMood::Jealous,
            CharacterMood::Neutral,
        ]
    }

    /// Wire/prompt representation (matches the serde form)
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterMood::Angry => "angry",
            CharacterMood::Scared => "scared",
            CharacterMood::InLove => "in_love",
            CharacterMood::Happy => "happy",
            CharacterMood::Sad => "sad",
            CharacterMood::Nervous => "nervous",
            CharacterMood::Confident => "confident",
            CharacterMood::Suspicious => "suspicious",
            CharacterMood::Grateful => "grateful",
            CharacterMood::Jealous => "jealous",
            CharacterMood::Neutral => "neutral",
        }
    }

    /// Get a display name for the mood
    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterMood::Angry => "Angry",
            CharacterMood::Scared => "Scared",
            CharacterMood::InLove => "In Love",
            CharacterMood::Happy => "Happy",
            CharacterMood::Sad => "Sad",
            CharacterMood::Nervous => "Nervous",
            CharacterMood::Confident => "Confident",
            CharacterMood::Suspicious => "Suspicious",
            CharacterMood::Grateful => "Grateful",
            CharacterMood::Jealous => "Jealous",
            CharacterMood::Neutral => "Neutral",
        }
    }

    /// Get an emoji representation
    pub fn emoji(&self) -> &'static str {
        match self {
            CharacterMood::Angry => "😠",
            CharacterMood::Scared => "😨",
            CharacterMood::InLove => "😍",
            CharacterMood::Happy => "😊",
            CharacterMood::Sad => "😢",
            CharacterMood::Nervous => "😰",
            CharacterMood::Confident => "😎",
            CharacterMood::Suspicious => "🤨",
            CharacterMood::Grateful => "🙏",
            CharacterMood::Jealous => "😒",
            CharacterMood::Neutral => "😐",
        }
    }
}

impl fmt::Display for CharacterMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterMood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "angry" => Ok(CharacterMood::Angry),
            "scared" => Ok(CharacterMood::Scared),
            "in_love" | "inlove" => Ok(CharacterMood::InLove),
            "happy" => Ok(CharacterMood::Happy),
            "sad" => Ok(CharacterMood::Sad),
            "nervous" => Ok(CharacterMood::Nervous),
            "confident" => Ok(CharacterMood::Confident),
            "suspicious" => Ok(CharacterMood::Suspicious),
            "grateful" => Ok(CharacterMood::Grateful),
            "jealous" => Ok(CharacterMood::Jealous),
            "neutral" => Ok(CharacterMood::Neutral),
            _ => Err(DomainError::parse(format!("Unknown mood: {}", s))),
        }
    }
}
