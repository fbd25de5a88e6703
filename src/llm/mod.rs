//! Completion client, wire types, and JSON extraction for LLM responses.

pub mod client;
pub mod json;
pub mod mock;
pub mod wire;

pub use client::{
    CompletionClient, CompletionRequest, CompletionResult, CompletionService, Route,
    request_completion,
};
pub use json::extract_json_object;
pub use mock::{FallbackReason, MOCK_COMPLETION};
