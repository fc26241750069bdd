//! Structured-output extraction from raw model text.
//!
//! Models routinely wrap their JSON payload in commentary or code fences.
//! The payload is taken to be everything between the first `{` and the last
//! `}` inclusive. Braces inside string values are not special-cased, so two
//! objects in one response produce a span that fails to parse.

use serde_json::{Map, Value};

use crate::error::LlmError;

/// Locate and parse the JSON object embedded in `text`.
///
/// # Errors
///
/// Returns [`LlmError::Extraction`] when `text` has no `{`, no `}`, or its
/// last `}` comes before its first `{`; [`LlmError::Parse`] when the span
/// is not valid JSON.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, LlmError> {
    let span = json_span(text).ok_or(LlmError::Extraction)?;
    Ok(serde_json::from_str(span)?)
}

/// The inclusive `{ ... }` span from the first `{` to the last `}`.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}
