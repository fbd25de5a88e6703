//! `POST /api/chat`: forwards one system + user exchange to the completion API.
//!
//! The server is the credential holder, so unlike the client it has no mock
//! fallback: every failure is reported to the caller with a status and an
//! `{ "error": ... }` body.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::error::ProxyError;
use crate::llm::wire::{
    CREDENTIAL_ENV_VAR, ChatCompletionBody, ErrorReply, ProxyChatReply, ProxyChatRequest,
    completion_content, filled, parse_payload, post_chat_completion,
};

use super::AppState;

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingInput => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::MissingCredential(_)
            | ProxyError::NoContent
            | ProxyError::InvalidResponse(_)
            | ProxyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorReply {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handle a chat proxy request.
///
/// The body is parsed leniently: anything that is not the expected object is
/// treated as an empty request and rejected for missing input.
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ProxyChatRequest = serde_json::from_slice(&body).unwrap_or_default();

    match forward(&state, request).await {
        Ok(content) => (StatusCode::OK, Json(ProxyChatReply { content })).into_response(),
        Err(e) => {
            if e.status_code().is_server_error() {
                warn!("Chat proxy request failed: {}", e);
            } else {
                info!("Chat proxy request rejected: {}", e);
            }
            e.into_response()
        }
    }
}

async fn forward(state: &AppState, request: ProxyChatRequest) -> Result<String, ProxyError> {
    let (Some(system_prompt), Some(user_input)) = (
        filled(request.system_prompt),
        filled(request.user_input),
    ) else {
        return Err(ProxyError::MissingInput);
    };

    let credential = filled(request.api_key)
        .or_else(|| state.credential.clone())
        .ok_or(ProxyError::MissingCredential(CREDENTIAL_ENV_VAR))?;

    let model = filled(request.model).unwrap_or_else(|| state.default_model.clone());

    let body = ChatCompletionBody::new(&model, &system_prompt, &user_input);
    let response =
        post_chat_completion(&state.http, &state.upstream_url, &credential, &body).await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let body = if text.is_empty() {
            "OpenAI request failed".to_string()
        } else {
            text
        };
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let payload = parse_payload(&text).map_err(|e| ProxyError::InvalidResponse(e.to_string()))?;
    completion_content(&payload).ok_or(ProxyError::NoContent)
}

/// Answer any method other than POST.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorReply {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}
