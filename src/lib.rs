//! mediator - prompt builder, chat-completion proxy, and tolerant JSON extraction
//! for a value-translation AI mediator.
//!
//! # Overview
//!
//! A caller picks a tone and audience, [`build_mediator_prompt`] turns them into a
//! system instruction, the [`CompletionClient`] sends it with the participant's
//! statement (or answers with a canned mock when no API is reachable), and
//! [`extract_fields`] recovers whatever JSON the model produced. The
//! [`server`] module exposes the credential-holding proxy route the client
//! talks to.

pub mod config;
pub mod error;
pub mod llm;
pub mod mediation;
pub mod server;

// Re-export commonly used types
pub use config::Settings;
pub use error::{CompletionError, ProxyError};
pub use llm::{CompletionClient, CompletionRequest, CompletionResult, CompletionService, Route};
pub use mediation::{
    Analysis, Audience, ExtractedFields, PromptConfiguration, Tone, build_mediator_prompt,
    extract_fields,
};
