//! HTTP surface: the chat proxy route plus a health check.

pub mod chat;

use std::fmt;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tracing::info;

use crate::config::{CHAT_ROUTE, Settings};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub(crate) http: reqwest::Client,
    pub(crate) upstream_url: String,
    pub(crate) credential: Option<String>,
    pub(crate) default_model: String,
}

impl AppState {
    pub fn new(
        upstream_url: impl Into<String>,
        credential: Option<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream_url: upstream_url.into(),
            credential: crate::llm::wire::non_empty(credential),
            default_model: default_model.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.upstream_url.clone(),
            settings.credential.clone(),
            settings.model.clone(),
        )
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("upstream_url", &self.upstream_url)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("default_model", &self.default_model)
            .finish()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            CHAT_ROUTE,
            post(chat::handle).fallback(chat::method_not_allowed),
        )
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> axum::Json<Value> {
    axum::Json(json!({ "status": "ok" }))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Chat proxy listening on http://{}{} (server credential: {})",
        listener.local_addr()?,
        CHAT_ROUTE,
        if state.has_credential() { "configured" } else { "missing" }
    );
    axum::serve(listener, router(state)).await
}
