//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use mediator::config::CHAT_ROUTE;
use mediator::server::{AppState, router};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Path the mock upstream serves completions on.
pub const UPSTREAM_PATH: &str = "/v1/chat/completions";

/// Upstream completions URL on a mock server.
pub fn upstream_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), UPSTREAM_PATH)
}

/// A successful upstream completion body carrying `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

/// A URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}{}", addr, UPSTREAM_PATH)
}

/// Start the chat proxy on an ephemeral port. Returns the full route URL.
pub async fn spawn_proxy(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind proxy port");
    let addr = listener.local_addr().expect("Failed to read proxy address");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Chat proxy stopped unexpectedly");
    });

    format!("http://{}{}", addr, CHAT_ROUTE)
}
