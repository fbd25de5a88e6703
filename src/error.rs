//! Error types for mediator modules using thiserror.

use thiserror::Error;

/// Errors from the completion client.
///
/// A missing credential and network failures never show up here: the client
/// substitutes the mock completion for those instead.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("{0} returned no content")]
    NoContent(String),

    #[error("Completion API returned an unparseable body: {0}")]
    InvalidResponse(String),

    #[error("Failed to read completion response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("Failed to send completion request: {0}")]
    Request(#[source] reqwest::Error),
}

impl CompletionError {
    /// HTTP status of an upstream failure, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the chat proxy route.
///
/// Each variant maps to the HTTP status the route answers with; the display
/// text becomes the `error` field of the JSON body.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Missing systemPrompt or userInput")]
    MissingInput,

    #[error("Missing {0} on server")]
    MissingCredential(&'static str),

    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("OpenAI API returned no content")]
    NoContent,

    #[error("{0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}
