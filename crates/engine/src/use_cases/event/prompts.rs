//! Prompt text for the LLM-backed event capabilities.

use villagesim_domain::{final_mood, CharacterMood, EventConfig, Participant, Turn};

use super::capabilities::ResponseContext;
use super::state::EventState;

pub const EVENT_SYSTEM_PROMPT: &str = "\
You write scenes for a farm village simulation set in a small medieval fantasy world. \
Magic exists but is rare and quiet. Villagers are farmers, smiths, herbalists, merchants \
and innkeepers who value hard work and look out for their neighbours.

Keep every character true to their temperament, traits and history. Dialogue should sound \
natural for the setting, actions should be small and believable, and the current mood \
should colour how a character speaks and moves. Let the kind of event set the tone.

Reply with a single JSON object and nothing else.";

pub const SUPERVISOR_SYSTEM_PROMPT: &str = "\
You direct scenes between two villagers in a farm village simulation. You decide whether \
a scene goes on, who speaks next and how each character feels. \
Reply with a single JSON object and nothing else.";

pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You summarise scenes between villagers in a farm village simulation. \
Reply with a single JSON object and nothing else.";

const NO_HISTORY: &str = "(nothing yet, this is the first turn)";

/// One line per turn: `Turn 2 - Tobin (nervous): "words" *action*`.
pub fn format_history(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return NO_HISTORY.to_string();
    }

    turns
        .iter()
        .map(|turn| {
            format!(
                "Turn {} - {} ({}): {}",
                turn.turn_number,
                turn.speaker_name,
                turn.mood,
                turn_content(turn)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn turn_content(turn: &Turn) -> String {
    let mut parts = Vec::new();
    if let Some(dialogue) = &turn.dialogue {
        parts.push(format!("\"{dialogue}\""));
    }
    if let Some(action) = &turn.action {
        parts.push(format!("*{action}*"));
    }
    parts.join(" ")
}

fn mood_choices() -> String {
    CharacterMood::all()
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn character_prompt(context: &ResponseContext) -> String {
    let speaker = &context.speaker;
    let personality = &speaker.personality;
    let config = &context.config;

    format!(
        "You are {name}, a {age}-year-old {occupation} in the village.

WHO YOU ARE
- Temperament: {temperament} ({temperament_desc})
- Good traits: {positive}
- Flaws: {negative}
- Quirks: {quirks}
- What you value: {values}
- What you fear: {fears}
- Came here because: {arrival}

THE SITUATION
- Event: {event_type}
- What is happening: {description}
- Where: {location}
- Your mood right now: {mood}

YOU ARE FACING
- {other_name}, the village {other_occupation}

WHAT HAS HAPPENED SO FAR
{history}

This is turn {turn_number}. At least {remaining} more turn(s) must happen before the scene can end.
Say and/or do what {name} would do next. Write the dialogue and action in {language}.

Reply with JSON: {{\"dialogue\": \"what you say, or null\", \"action\": \"what you do, or null\"}}",
        name = speaker.name,
        age = speaker.age,
        occupation = speaker.skills.occupation,
        temperament = personality.temperament.as_str(),
        temperament_desc = personality.temperament.description(),
        positive = list_or_none(&personality.positive_traits),
        negative = list_or_none(&personality.negative_traits),
        quirks = list_or_none(&personality.quirks),
        values = list_or_none(&personality.values),
        fears = list_or_none(&personality.fears),
        arrival = speaker.backstory.reason_for_arrival,
        event_type = config.event_type,
        description = config.description,
        location = config.location,
        mood = context.speaker_mood,
        other_name = context.counterpart.name,
        other_occupation = context.counterpart.occupation,
        history = format_history(&context.history),
        turn_number = context.turn_number,
        remaining = context.remaining_interactions,
        language = config.language,
    )
}

fn target_mood_guidance(state: &EventState, config: &EventConfig) -> String {
    let lines: Vec<String> = [Participant::A, Participant::B]
        .into_iter()
        .filter_map(|p| {
            config
                .target_mood(p)
                .map(|mood| format!("- {} should end up feeling {}", state.name(p), mood))
        })
        .collect();

    if lines.is_empty() {
        "No target moods. Let the moods follow naturally from what happens.".to_string()
    } else {
        format!(
            "Steer the moods gradually toward:\n{}",
            lines.join("\n")
        )
    }
}

fn when_line(config: &EventConfig) -> String {
    config
        .timestamp
        .map(|at| format!("\n- When: {}", at.format("%Y-%m-%d %H:%M")))
        .unwrap_or_default()
}

pub fn supervisor_prompt(state: &EventState, config: &EventConfig) -> String {
    let (earlier, latest) = match state.turns().split_last() {
        Some((last, earlier)) => (format_history(earlier), format_history(std::slice::from_ref(last))),
        None => (NO_HISTORY.to_string(), "(none)".to_string()),
    };

    format!(
        "THE SCENE
- Event: {event_type}
- What is happening: {description}
- Where: {location}{when}
- Turns so far: {turns} (at least {min}, at most {max})

PARTICIPANTS
- character_a: {a_name}, currently {a_mood}
- character_b: {b_name}, currently {b_mood}

MOOD DIRECTION
{targets}

EARLIER TURNS
{earlier}

LATEST TURN
{latest}

Decide:
1. Should the scene continue? It must go on until {min} turns have happened and must stop at {max}. \
In between, end it when it reaches a natural close.
2. If it continues, who speaks next: \"character_a\" or \"character_b\".
3. How each character feels now. Use one of: {moods}.

Reply with JSON: {{\"should_continue\": true, \"next_speaker\": \"character_a\", \
\"character_a_mood\": \"neutral\", \"character_b_mood\": \"neutral\", \"end_reason\": null}}",
        event_type = config.event_type,
        description = config.description,
        location = config.location,
        when = when_line(config),
        turns = state.turn_counter(),
        min = config.min_interactions,
        max = config.max_interactions,
        a_name = state.name(Participant::A),
        a_mood = state.mood(Participant::A),
        b_name = state.name(Participant::B),
        b_mood = state.mood(Participant::B),
        targets = target_mood_guidance(state, config),
        earlier = earlier,
        latest = latest,
        moods = mood_choices(),
    )
}

/// Names come from the state, so a character who never spoke is still named.
pub fn summary_prompt(state: &EventState, config: &EventConfig) -> String {
    let turns = state.turns();
    let participants = [Participant::A, Participant::B]
        .into_iter()
        .map(|p| {
            format!(
                "- {}: started {}, ended {}",
                state.name(p),
                config.initial_mood(p),
                final_mood(config, turns, p)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Summarise this scene.

- Event: {event_type}
- Where: {location}
- What was happening: {description}

PARTICIPANTS
{participants}

TRANSCRIPT
{transcript}

Write in {language}: a summary of two or three sentences, and the outcome or resolution.

Reply with JSON: {{\"summary\": \"...\", \"outcome\": \"...\"}}",
        event_type = config.event_type,
        location = config.location,
        description = config.description,
        participants = participants,
        transcript = format_history(turns),
        language = config.language,
    )
}
