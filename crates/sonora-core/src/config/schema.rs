//! Configuration schema.
//!
//! Hierarchy: `Config` → `GatewayConfig`, `ChatDefaults`, provider endpoint
//! overrides, `StoreConfig`, `IdentityConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.sonora/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub chat: ChatDefaults,
    /// Per-provider endpoint overrides, keyed by provider id.
    pub providers: HashMap<String, EndpointConfig>,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

impl Config {
    /// Base URL override for a provider, if one is configured.
    pub fn api_base_for(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider)
            .and_then(|p| p.api_base.as_deref())
    }
}

// ─────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────

/// HTTP gateway settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Outer per-request timeout for the HTTP layer, in seconds.
    ///
    /// Upstream provider calls have their own fixed timeout; this only bounds
    /// how long an inbound connection may stay open.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 90,
        }
    }
}

// ─────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────

/// Generation parameters sent to providers whose request body carries them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatDefaults {
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Endpoint override for one provider.
///
/// Credentials are never configured here: they travel with each request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointConfig {
    /// Custom API base URL (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

// ─────────────────────────────────────────────
// Store & identity
// ─────────────────────────────────────────────

/// Where per-user model selections are kept.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// JSON file backing the store. `None` keeps selections in memory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// How the gateway learns who the caller is.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityConfig {
    /// Header carrying the already-authenticated user id, set by the
    /// upstream auth middleware.
    pub user_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_header: "x-user-id".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.chat.temperature, 0.7);
        assert_eq!(config.chat.max_tokens, 2000);
        assert!(config.providers.is_empty());
        assert!(config.store.path.is_none());
        assert_eq!(config.identity.user_header, "x-user-id");
    }

    #[test]
    fn test_camel_case_keys() {
        let json = r#"{
            "gateway": {"requestTimeoutSecs": 30},
            "chat": {"maxTokens": 512},
            "providers": {"openai": {"apiBase": "http://localhost:9000/v1"}},
            "identity": {"userHeader": "x-auth-user"}
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.gateway.request_timeout_secs, 30);
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.chat.max_tokens, 512);
        assert_eq!(config.chat.temperature, 0.7);
        assert_eq!(config.identity.user_header, "x-auth-user");
        assert_eq!(
            config.api_base_for("openai"),
            Some("http://localhost:9000/v1")
        );
        assert_eq!(config.api_base_for("cohere"), None);
    }

    #[test]
    fn test_empty_endpoint_has_no_base() {
        let json = r#"{"providers": {"groq": {}}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_for("groq"), None);
    }
}
