//! Tolerant JSON extraction from free-form LLM output.
//!
//! Models asked for "JSON only" still wrap the object in markdown fences or
//! surround it with chatter. Extraction is best-effort: anything that does not
//! yield an object is reported as `None`, never as an error, and the caller
//! falls back to showing the raw text.

use serde_json::{Map, Value};
use tracing::debug;

/// Remove every markdown code-fence marker (` ```json ` and bare ` ``` `).
pub fn strip_code_fences(response: &str) -> String {
    response.replace("```json", "").replace("```", "")
}

/// Extract the JSON object embedded in an LLM response.
///
/// Steps:
/// 1. Slice the trimmed response from the first `{` to the last `}` (inclusive)
///    and parse it as a JSON object
/// 2. If that fails, strip code-fence markers and try the same slice again
///
/// The unstripped attempt comes first so fence markers inside string values
/// survive. Returns `None` when there is no brace pair or neither slice parses.
/// Fields are returned as-is; nothing is validated or coerced.
pub fn extract_json_object(response: &str) -> Option<Map<String, Value>> {
    if let Some(object) = parse_object_slice(response) {
        return Some(object);
    }

    let cleaned = strip_code_fences(response);
    match parse_object_slice(&cleaned) {
        Some(object) => Some(object),
        None => {
            debug!("Response does not contain a JSON object");
            None
        }
    }
}

fn parse_object_slice(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&trimmed[start..=end]).ok()
}
