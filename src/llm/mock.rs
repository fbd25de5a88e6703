//! Canned completion used when no real call can be made.

use std::fmt;

use reqwest::StatusCode;

use super::wire::CREDENTIAL_ENV_VAR;

/// Fixed text returned in place of a real completion.
pub const MOCK_COMPLETION: &str = r#"sample output (mock): {"sentiment":"concerned","key_issue":"safety_mechanism","suggestion_for_next":"include safety-mechanism criteria in the consensus draft"}"#;

/// Why a request was answered with the mock completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential from the caller or the configuration on a direct call.
    NoCredential,
    /// The endpoint answered 404: no proxy route is deployed.
    RouteNotFound,
    /// The proxy answered 500 because it holds no credential either.
    ServerMissingCredential,
    /// The request never reached a server.
    Unreachable,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::NoCredential => "no credential configured",
            FallbackReason::RouteNotFound => "completion route not found",
            FallbackReason::ServerMissingCredential => "server has no credential",
            FallbackReason::Unreachable => "completion endpoint unreachable",
        }
    }

    /// Classify a non-success response as a mock-worthy configuration gap.
    ///
    /// Returns `None` for genuine upstream failures, which must propagate.
    pub fn from_status(status: StatusCode, body: &str) -> Option<Self> {
        if status == StatusCode::NOT_FOUND {
            return Some(FallbackReason::RouteNotFound);
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR
            && body.contains(&format!("Missing {CREDENTIAL_ENV_VAR}"))
        {
            return Some(FallbackReason::ServerMissingCredential);
        }
        None
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
