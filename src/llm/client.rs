//! Completion client: one POST per call, with a canned fallback.
//!
//! The client talks either to the local chat proxy or straight to the
//! upstream completion API. Missing credentials, a missing proxy route, or an
//! unreachable endpoint resolve to the mock completion so a caller
//! without any configuration still gets a well-formed result. Every other
//! failure propagates as a [`CompletionError`].

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::CompletionError;

use super::mock::{FallbackReason, MOCK_COMPLETION};
use super::wire::{
    ChatCompletionBody, DEFAULT_MODEL, ProxyChatRequest, completion_content, non_empty,
    parse_payload, post_chat_completion,
};

/// Where completion requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Local chat proxy endpoint (`POST {apiKey?, model, systemPrompt, userInput}`).
    Proxy(String),
    /// Upstream chat completions endpoint, authenticated with a bearer credential.
    Direct(String),
}

impl Route {
    pub fn endpoint(&self) -> &str {
        match self {
            Route::Proxy(url) | Route::Direct(url) => url,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Route::Proxy(_) => "Chat proxy",
            Route::Direct(_) => "OpenAI API",
        }
    }
}

/// A single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub instruction: String,
    pub user_text: String,
    pub credential: Option<String>,
    pub model: String,
}

impl CompletionRequest {
    /// Request with the default model and no explicit credential.
    pub fn new(instruction: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            user_text: user_text.into(),
            credential: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Outcome of a completion call. The caller owns it outright.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub text: String,
    pub was_mocked: bool,
    /// Parsed response body of a real call.
    pub raw_payload: Option<Value>,
}

impl CompletionResult {
    /// The canned completion.
    pub fn mock() -> Self {
        Self {
            text: MOCK_COMPLETION.to_string(),
            was_mocked: true,
            raw_payload: None,
        }
    }
}

/// Anything that can turn a [`CompletionRequest`] into a [`CompletionResult`].
///
/// This abstraction allows mocking the HTTP client in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResult, CompletionError>;
}

/// HTTP completion client. Cheap to clone; holds no per-call state.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    route: Route,
    default_credential: Option<String>,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("route", &self.route)
            .field(
                "default_credential",
                &self.default_credential.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl CompletionClient {
    /// Create a client for `route`, using `default_credential` when a request
    /// does not carry its own.
    pub fn new(route: Route, default_credential: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            route,
            default_credential: non_empty(default_credential),
        }
    }

    /// Client configured from process settings.
    pub fn from_settings(settings: &Settings, force_direct: bool) -> Self {
        Self::new(settings.route(force_direct), settings.credential.clone())
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    fn resolve_credential(&self, explicit: Option<String>) -> Option<String> {
        non_empty(explicit).or_else(|| self.default_credential.clone())
    }

    /// Issue one completion request.
    ///
    /// Resolves to the mock completion when no credential is available for a
    /// direct call, when the endpoint answers 404 or reports a missing server
    /// credential, or when the endpoint cannot be reached. A malformed endpoint
    /// URL is an error.
    pub async fn request(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        let credential = self.resolve_credential(request.credential);

        let sent = match &self.route {
            Route::Direct(endpoint) => {
                let Some(credential) = credential else {
                    return Ok(fallback(FallbackReason::NoCredential));
                };
                let body =
                    ChatCompletionBody::new(&request.model, &request.instruction, &request.user_text);
                post_chat_completion(&self.http, endpoint, &credential, &body).await
            }
            Route::Proxy(endpoint) => {
                let body = ProxyChatRequest {
                    api_key: credential,
                    model: Some(request.model),
                    system_prompt: Some(request.instruction),
                    user_input: Some(request.user_text),
                };
                self.http.post(endpoint).json(&body).send().await
            }
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) if is_network_failure(&e) => {
                warn!("Completion request to {} failed: {}", self.route.endpoint(), e);
                return Ok(fallback(FallbackReason::Unreachable));
            }
            Err(e) => return Err(CompletionError::Request(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            if let Some(reason) = FallbackReason::from_status(status, &body) {
                return Ok(fallback(reason));
            }
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(CompletionError::ReadBody)?;
        let payload =
            parse_payload(&body).map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let content = match self.route {
            Route::Direct(_) => completion_content(&payload),
            Route::Proxy(_) => proxy_content(&payload),
        };

        let Some(text) = content else {
            return Err(CompletionError::NoContent(self.route.label().to_string()));
        };

        debug!("Completion returned {} chars", text.len());
        Ok(CompletionResult {
            text,
            was_mocked: false,
            raw_payload: Some(payload),
        })
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        self.request(request).await
    }
}

/// One-shot completion using process settings: the proxy route when one is
/// configured, the upstream API otherwise.
pub async fn request_completion(
    settings: &Settings,
    request: CompletionRequest,
) -> Result<CompletionResult, CompletionError> {
    CompletionClient::from_settings(settings, false)
        .request(request)
        .await
}

fn proxy_content(payload: &Value) -> Option<String> {
    payload
        .get("content")?
        .as_str()
        .filter(|content| !content.is_empty())
        .map(str::to_owned)
}

/// Connection, DNS and timeout failures. A malformed endpoint is a builder
/// error and is not one of these.
fn is_network_failure(e: &reqwest::Error) -> bool {
    !e.is_builder() && (e.is_connect() || e.is_timeout() || e.is_request())
}

fn fallback(reason: FallbackReason) -> CompletionResult {
    info!("Using mock completion: {}", reason);
    CompletionResult::mock()
}
