//! Process-wide settings read from the environment.
//!
//! Lookup order for every value: CLI flag (applied by the binary), then the
//! environment (including a `.env` file loaded by `main`), then the default.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

use crate::llm::client::Route;
use crate::llm::wire::{CREDENTIAL_ENV_VAR, DEFAULT_MODEL, DEFAULT_UPSTREAM_URL};

/// Environment variable overriding the default model.
pub const MODEL_ENV_VAR: &str = "MEDIATOR_MODEL";

/// Environment variable overriding the upstream completions URL.
pub const UPSTREAM_URL_ENV_VAR: &str = "MEDIATOR_UPSTREAM_URL";

/// Environment variable naming the local chat proxy endpoint.
pub const PROXY_URL_ENV_VAR: &str = "MEDIATOR_PROXY_URL";

/// Environment variable overriding the server bind address.
pub const BIND_ENV_VAR: &str = "MEDIATOR_BIND";

/// Default bind address for the chat proxy.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Path of the proxy route on the server.
pub const CHAT_ROUTE: &str = "/api/chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Credential for the completion API. Never logged.
    pub credential: Option<String>,
    pub model: String,
    pub upstream_url: String,
    pub proxy_url: Option<String>,
    pub bind: SocketAddr,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential: None,
            model: DEFAULT_MODEL.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            proxy_url: None,
            bind: default_bind(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Empty variables count as unset. An unparseable bind address logs a
    /// warning and falls back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            credential: env_non_empty(CREDENTIAL_ENV_VAR),
            model: env_non_empty(MODEL_ENV_VAR).unwrap_or(defaults.model),
            upstream_url: env_non_empty(UPSTREAM_URL_ENV_VAR).unwrap_or(defaults.upstream_url),
            proxy_url: env_non_empty(PROXY_URL_ENV_VAR),
            bind: get_bind(),
        }
    }

    /// Route the completion client should use.
    ///
    /// The proxy is preferred when one is configured, unless `force_direct` is set.
    pub fn route(&self, force_direct: bool) -> Route {
        match &self.proxy_url {
            Some(proxy) if !force_direct => Route::Proxy(proxy.clone()),
            _ => Route::Direct(self.upstream_url.clone()),
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn get_bind() -> SocketAddr {
    match env::var(BIND_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => match v.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}",
                    BIND_ENV_VAR, v, DEFAULT_BIND
                );
                default_bind()
            }
        },
        _ => default_bind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 5] = [
        CREDENTIAL_ENV_VAR,
        MODEL_ENV_VAR,
        UPSTREAM_URL_ENV_VAR,
        PROXY_URL_ENV_VAR,
        BIND_ENV_VAR,
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|v| (*v, None)).collect()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        temp_env::with_vars(unset_all(), || {
            let settings = Settings::from_env();
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.bind.to_string(), DEFAULT_BIND);
        });
    }

    #[test]
    fn test_reads_all_values() {
        temp_env::with_vars(
            [
                (CREDENTIAL_ENV_VAR, Some("sk-test")),
                (MODEL_ENV_VAR, Some("gpt-test")),
                (UPSTREAM_URL_ENV_VAR, Some("http://upstream.local/v1")),
                (PROXY_URL_ENV_VAR, Some("http://localhost:3000/api/chat")),
                (BIND_ENV_VAR, Some("0.0.0.0:8080")),
            ],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.credential.as_deref(), Some("sk-test"));
                assert_eq!(settings.model, "gpt-test");
                assert_eq!(settings.upstream_url, "http://upstream.local/v1");
                assert_eq!(
                    settings.proxy_url.as_deref(),
                    Some("http://localhost:3000/api/chat")
                );
                assert_eq!(settings.bind.to_string(), "0.0.0.0:8080");
            },
        );
    }

    #[test]
    fn test_blank_credential_is_unset() {
        temp_env::with_var(CREDENTIAL_ENV_VAR, Some("   "), || {
            assert_eq!(Settings::from_env().credential, None);
        });
    }

    #[test]
    fn test_invalid_bind_uses_default() {
        temp_env::with_var(BIND_ENV_VAR, Some("not an address"), || {
            assert_eq!(Settings::from_env().bind, default_bind());
        });
    }

    #[test]
    fn test_route_prefers_proxy() {
        let settings = Settings {
            proxy_url: Some("http://localhost:3000/api/chat".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            settings.route(false),
            Route::Proxy("http://localhost:3000/api/chat".to_string())
        );
        assert_eq!(
            settings.route(true),
            Route::Direct(DEFAULT_UPSTREAM_URL.to_string())
        );
    }

    #[test]
    fn test_route_direct_without_proxy() {
        assert_eq!(
            Settings::default().route(false),
            Route::Direct(DEFAULT_UPSTREAM_URL.to_string())
        );
    }
}
