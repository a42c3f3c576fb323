//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! Fixture files live under `test_data/`. Scripted capabilities in
//! [`scripted`] stand in for the LLM when driving whole events.

pub mod scripted;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use villagesim_domain::{
    Appearance, Backstory, Build, CharacterId, CharacterMood, CharacterProfile, ClosingSummary,
    EventConfig, EventId, EventRecord, EventType, Gender, Personality, Skills, StatBlock,
    Temperament, Transcript, Turn,
};

pub use scripted::{ScriptedFinalizer, ScriptedResponder, ScriptedSupervisor};

use crate::infrastructure::ports::MockCharacterRepo;
use crate::infrastructure::resilient_llm::RetryConfig;
use crate::use_cases::event::DriverPolicy;

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from the test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

// =============================================================================
// Characters
// =============================================================================

/// A complete profile with a fresh id.
pub fn sample_profile(name: &str, occupation: &str) -> CharacterProfile {
    CharacterProfile {
        id: CharacterId::new(),
        name: name.to_string(),
        age: 34,
        gender: Gender::Female,
        appearance: Appearance {
            height_cm: 168,
            build: Build::Athletic,
            hair_color: "auburn".into(),
            hair_style: "braided".into(),
            eye_color: "green".into(),
            skin_tone: "weathered".into(),
            distinguishing_features: vec!["burn scar on left hand".into()],
            clothing_style: "patched work clothes".into(),
        },
        personality: Personality {
            temperament: Temperament::Choleric,
            positive_traits: vec!["hardworking".into(), "honest".into()],
            negative_traits: vec!["stubborn".into()],
            quirks: vec!["counts everything twice".into()],
            values: vec!["family".into()],
            fears: vec!["a failed harvest".into()],
        },
        backstory: Backstory {
            origin_village: "Millbrook".into(),
            family_status: "widowed".into(),
            parents_occupation: "millers".into(),
            reason_for_arrival: "inherited a plot of land".into(),
            life_events: vec![],
            secrets: vec!["owes money to the innkeeper".into()],
        },
        skills: Skills {
            occupation: occupation.to_string(),
            primary_skills: vec!["planting".into()],
            secondary_skills: vec![],
            stats: StatBlock {
                strength: 6,
                dexterity: 5,
                constitution: 7,
                intelligence: 5,
                wisdom: 6,
                charisma: 4,
            },
            special_talent: None,
        },
        portrait_description: format!("{name}, a {occupation}"),
    }
}

/// Character repo mock that serves the given profiles and nothing else.
pub fn character_repo(profiles: Vec<CharacterProfile>) -> MockCharacterRepo {
    let by_id: HashMap<CharacterId, CharacterProfile> =
        profiles.into_iter().map(|p| (p.id, p)).collect();
    let mut repo = MockCharacterRepo::new();
    repo.expect_get()
        .returning(move |id| Ok(by_id.get(&id).cloned()));
    repo
}

// =============================================================================
// Events
// =============================================================================

pub fn sample_config(a: &CharacterProfile, b: &CharacterProfile) -> EventConfig {
    EventConfig::new(
        EventType::Argument,
        "A goat got into the vegetable patch",
        "the fence between their farms",
        a.id,
        b.id,
    )
    .with_initial_moods(CharacterMood::Angry, CharacterMood::Nervous)
}

/// A stored event between two fresh characters.
pub fn sample_record() -> EventRecord {
    sample_record_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid date"))
}

pub fn sample_record_at(generated_at: chrono::DateTime<Utc>) -> EventRecord {
    let mara = sample_profile("Mara", "farmer");
    let tobin = sample_profile("Tobin", "blacksmith");
    sample_record_between(&mara, &tobin, generated_at)
}

pub fn sample_record_between(
    a: &CharacterProfile,
    b: &CharacterProfile,
    generated_at: chrono::DateTime<Utc>,
) -> EventRecord {
    let config = sample_config(a, b).with_bounds(2, 3);
    let turns = vec![
        Turn::new(
            1,
            a.id,
            &a.name,
            Some("Your goat ate my cabbages!".into()),
            Some("points at the trampled rows".into()),
            CharacterMood::Angry,
            2,
        )
        .expect("valid turn"),
        Turn::new(
            2,
            b.id,
            &b.name,
            Some("I'll mend the fence tonight.".into()),
            None,
            CharacterMood::Nervous,
            1,
        )
        .expect("valid turn"),
    ];
    let transcript = Transcript::assemble(
        &config,
        turns,
        ClosingSummary::new("A goat caused trouble.", "The fence gets mended."),
        Some("they reached an agreement".into()),
    )
    .expect("valid transcript");
    EventRecord::new(EventId::new(), config, transcript, generated_at, 1_250)
}

// =============================================================================
// Driver
// =============================================================================

/// Driver policy with millisecond backoff so retry tests stay fast.
pub fn fast_policy() -> DriverPolicy {
    DriverPolicy {
        retry: RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
            jitter_factor: 0.0,
        },
        call_timeout: Duration::from_secs(5),
        ..DriverPolicy::default()
    }
}
