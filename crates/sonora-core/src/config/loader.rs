//! Config loader — reads `~/.sonora/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.sonora/config.json`
//! 3. Environment variables `SONORA_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, EndpointConfig};

/// Provider ids that accept a `SONORA_PROVIDERS__<ID>__API_BASE` override.
///
/// Must list exactly the ids of the provider registry.
pub const PROVIDER_ENV_NAMES: &[&str] = &[
    "openai",
    "anthropic",
    "google",
    "mistral",
    "cohere",
    "groq",
    "openrouter",
];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `SONORA_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `SONORA_GATEWAY__HOST` → `gateway.host`
/// - `SONORA_GATEWAY__PORT` → `gateway.port`
/// - `SONORA_GATEWAY__REQUEST_TIMEOUT_SECS` → `gateway.request_timeout_secs`
/// - `SONORA_CHAT__TEMPERATURE` → `chat.temperature`
/// - `SONORA_CHAT__MAX_TOKENS` → `chat.max_tokens`
/// - `SONORA_PROVIDERS__<ID>__API_BASE` → `providers.<id>.api_base`
/// - `SONORA_STORE__PATH` → `store.path`
/// - `SONORA_IDENTITY__USER_HEADER` → `identity.user_header`
fn apply_env_overrides(mut config: Config) -> Config {
    // Gateway
    if let Ok(val) = std::env::var("SONORA_GATEWAY__HOST") {
        config.gateway.host = val;
    }
    if let Ok(val) = std::env::var("SONORA_GATEWAY__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.gateway.port = p;
        }
    }
    if let Ok(val) = std::env::var("SONORA_GATEWAY__REQUEST_TIMEOUT_SECS") {
        if let Ok(n) = val.parse::<u64>() {
            config.gateway.request_timeout_secs = n;
        }
    }

    // Chat parameters
    if let Ok(val) = std::env::var("SONORA_CHAT__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.chat.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("SONORA_CHAT__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.chat.max_tokens = n;
        }
    }

    // Provider endpoints
    for name in PROVIDER_ENV_NAMES {
        apply_provider_env(&mut config, name);
    }

    // Store & identity
    if let Ok(val) = std::env::var("SONORA_STORE__PATH") {
        config.store.path = Some(val);
    }
    if let Ok(val) = std::env::var("SONORA_IDENTITY__USER_HEADER") {
        config.identity.user_header = val.to_ascii_lowercase();
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(config: &mut Config, name: &str) {
    let key = format!("SONORA_PROVIDERS__{}__API_BASE", name.to_ascii_uppercase());
    if let Ok(val) = std::env::var(key) {
        config
            .providers
            .entry(name.to_string())
            .or_insert_with(EndpointConfig::default)
            .api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.chat.max_tokens, 2000);
        assert_eq!(config.gateway.port, 8000);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "gateway": { "host": "127.0.0.1" },
            "chat": { "temperature": 0.2 }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.chat.temperature, 0.2);
        // Default preserved
        assert_eq!(config.chat.max_tokens, 2000);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.chat.max_tokens, 2000);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert!(config.store.path.is_none());
        assert_eq!(config.api_base_for("openai"), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.gateway.port = 8123;
        config.providers.insert(
            "mistral".to_string(),
            EndpointConfig {
                api_base: Some("http://localhost:7000/v1".to_string()),
            },
        );

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.gateway.port, 8123);
        assert_eq!(
            reloaded.api_base_for("mistral"),
            Some("http://localhost:7000/v1")
        );
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["chat"].get("maxTokens").is_some());
        assert!(raw["chat"].get("max_tokens").is_none());
        assert!(raw["identity"].get("userHeader").is_some());
    }

    #[test]
    fn test_env_override_provider_base() {
        std::env::set_var("SONORA_PROVIDERS__COHERE__API_BASE", "http://127.0.0.1:4010/v1");
        let config = apply_env_overrides(Config::default());
        assert_eq!(
            config.api_base_for("cohere"),
            Some("http://127.0.0.1:4010/v1")
        );
        std::env::remove_var("SONORA_PROVIDERS__COHERE__API_BASE");
    }

    #[test]
    fn test_env_override_user_header_lowercased() {
        std::env::set_var("SONORA_IDENTITY__USER_HEADER", "X-Forwarded-User");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.identity.user_header, "x-forwarded-user");
        std::env::remove_var("SONORA_IDENTITY__USER_HEADER");
    }

    #[test]
    fn test_env_override_invalid_number_ignored() {
        std::env::set_var("SONORA_GATEWAY__PORT", "not-a-port");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.gateway.port, 8000);
        std::env::remove_var("SONORA_GATEWAY__PORT");
    }
}
