//! Cleanup and JSON extraction for raw LLM replies.
//!
//! Models wrap the object they were asked for in all kinds of noise: special
//! tokens, `<think>` blocks, markdown fences, a sentence of preamble. The
//! helpers here strip that down to the first balanced `{ ... }` span and
//! deserialize it.

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use super::capabilities::GenerationError;

// Regex to remove model-specific special tokens (e.g., from gpt-oss, llama, etc.)
static SPECIAL_TOKENS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // - <|...|> style tokens
    // - [INST], [/INST] tokens (llama)
    // - <<SYS>>, <</SYS>> tokens (llama)
    Regex::new(r"<\|[^|>]+\|>|\[/?INST\]|<</?SYS>>").expect("valid regex")
});

// gpt-oss puts its analysis channel before the final one
static FINAL_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\|channel\|>final<\|message\|>(.*)$").expect("valid regex"));

// Reasoning models (qwen, deepseek) emit their scratchpad first
static THINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Remove model-specific special tokens and reasoning blocks.
pub fn strip_special_tokens(raw: &str) -> String {
    let without_thinking = THINK_RE.replace_all(raw, "");

    if let Some(content) = FINAL_CONTENT_RE
        .captures(&without_thinking)
        .and_then(|caps| caps.get(1))
    {
        return SPECIAL_TOKENS_RE
            .replace_all(content.as_str().trim(), "")
            .to_string();
    }

    SPECIAL_TOKENS_RE
        .replace_all(&without_thinking, "")
        .trim()
        .to_string()
}

/// The first balanced `{ ... }` span, if any.
///
/// Braces inside JSON strings do not count, so commentary after the object
/// (even commentary containing braces) is left out.
pub fn extract_json_object(content: &str) -> Option<&str> {
    object_spans(content).next()
}

/// Non-overlapping balanced `{ ... }` spans in order of appearance.
fn object_spans(content: &str) -> impl Iterator<Item = &str> {
    let mut from = 0;
    std::iter::from_fn(move || {
        while let Some(offset) = content[from..].find('{') {
            let start = from + offset;
            match balanced_end(&content[start..]) {
                Some(len) => {
                    from = start + len;
                    return Some(&content[start..start + len]);
                }
                None => from = start + 1,
            }
        }
        None
    })
}

/// Byte length of the object opening at the start of `text`, or None if it
/// never closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Clean a raw reply and deserialize the first JSON object inside it that
/// fits `T`.
///
/// Spans that fail to deserialize are skipped, so a stray `{placeholder}` in
/// preamble does not hide the real object. The first failure is reported when
/// nothing fits.
pub fn parse_json_reply<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let cleaned = strip_special_tokens(raw);
    let mut first_error = None;

    for json in object_spans(&cleaned) {
        match serde_json::from_str(json) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    json = %truncate(json, 200),
                    "Failed to parse LLM JSON reply"
                );
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(GenerationError::malformed(e)),
        None => {
            tracing::warn!(
                response = %truncate(&cleaned, 200),
                "LLM reply did not contain a JSON object"
            );
            Err(GenerationError::malformed("no JSON object in reply"))
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
