//! Loosely-typed view of the fields a mediator response may carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm::json::extract_json_object;

/// Shown in place of a field the model did not return.
pub const PLACEHOLDER: &str = "—";

/// Field names the prompt asks for, with the camelCase spelling also accepted.
pub const FIELD_KEYS: [(&str, &str); 6] = [
    ("sentiment", "sentiment"),
    ("value_tags", "valueTags"),
    ("fallacy", "fallacy"),
    ("rewrite", "rewrite"),
    ("consensus_stub", "consensusStub"),
    ("minority_note", "minorityNote"),
];

/// Structured fields pulled out of a completion.
///
/// Nothing is guaranteed present and no types are enforced; accessors return
/// `None` (or an empty list) for anything missing or of an unexpected shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(Map<String, Value>);

impl ExtractedFields {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a field by its snake_case name, falling back to camelCase.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).or_else(|| {
            FIELD_KEYS
                .iter()
                .find(|(snake, _)| *snake == key)
                .and_then(|(_, camel)| self.0.get(*camel))
        })
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn sentiment(&self) -> Option<&str> {
        self.get_str("sentiment")
    }

    /// Value tags; a lone string counts as a single tag.
    pub fn value_tags(&self) -> Vec<&str> {
        match self.get("value_tags") {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn fallacy(&self) -> Option<&str> {
        self.get_str("fallacy")
    }

    pub fn rewrite(&self) -> Option<&str> {
        self.get_str("rewrite")
    }

    pub fn consensus_stub(&self) -> Option<&str> {
        self.get_str("consensus_stub")
    }

    pub fn minority_note(&self) -> Option<&str> {
        self.get_str("minority_note")
    }

    /// Render a field for display, or [`PLACEHOLDER`] if absent or empty.
    pub fn display(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => PLACEHOLDER.to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => PLACEHOLDER.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) if items.is_empty() => PLACEHOLDER.to_string(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => other.to_string(),
        }
    }
}

/// Extract mediator fields from a completion's text.
///
/// Returns `None` when no JSON object can be recovered; callers then show the
/// raw text instead.
pub fn extract_fields(text: &str) -> Option<ExtractedFields> {
    extract_json_object(text).map(ExtractedFields)
}
