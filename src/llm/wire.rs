//! Request and response shapes for the chat-completion API and the local proxy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model used when neither the caller nor the configuration names one.
pub const DEFAULT_MODEL: &str = "gpt-5.1";

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f64 = 0.3;

/// Environment variable holding the completion API credential.
pub const CREDENTIAL_ENV_VAR: &str = "OPENAI_API_KEY";

/// Upstream chat completions endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Body of an upstream chat completion request: one system and one user message.
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatCompletionBody<'a> {
    pub fn new(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

/// Body accepted by the local chat proxy route.
///
/// Every field is optional on the wire so the route can answer a missing
/// field with its own 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

/// Successful proxy reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyChatReply {
    pub content: String,
}

/// Error reply from the proxy route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Pull `choices[0].message.content` out of an upstream response payload.
///
/// Empty strings count as missing.
pub fn completion_content(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .filter(|content| !content.is_empty())
        .map(str::to_owned)
}

/// Parse a response body as JSON, treating an empty body as `{}`.
pub fn parse_payload(body: &str) -> Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body)
}

/// Send one chat completion request to `endpoint` with bearer authentication.
pub async fn post_chat_completion(
    http: &reqwest::Client,
    endpoint: &str,
    credential: &str,
    body: &ChatCompletionBody<'_>,
) -> reqwest::Result<reqwest::Response> {
    http.post(endpoint)
        .bearer_auth(credential)
        .json(body)
        .send()
        .await
}

/// Treat empty or whitespace-only strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Treat only empty strings as absent; whitespace is kept.
pub fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
