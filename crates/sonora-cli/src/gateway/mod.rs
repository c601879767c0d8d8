//! `sonora serve` — the HTTP gateway.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Build the chat router (shared HTTP client + base URL overrides)
//! 3. Open the config store (file-backed if `store.path` is set, else in-memory)
//! 4. Bind and serve until Ctrl+C

mod handlers;
mod response;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use colored::Colorize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use sonora_core::config::{load_config, Config};
use sonora_core::store::{ConfigStore, FileConfigStore, MemoryConfigStore};
use sonora_providers::client::REQUEST_TIMEOUT;
use sonora_providers::ChatRouter;

use crate::helpers;

/// Headroom the inbound timeout keeps over the fixed upstream timeout, so a
/// slow provider surfaces as a `transport_error` body rather than an empty 408.
const INBOUND_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub router: ChatRouter,
    pub store: Arc<dyn ConfigStore>,
    /// Lowercase name of the header carrying the caller's user id.
    pub user_header: String,
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let timeout = inbound_timeout(request_timeout_secs);

    let api = Router::new()
        .route("/providers", get(handlers::list_providers))
        .route("/models/{provider}", get(handlers::list_models))
        .route("/chat", post(handlers::chat))
        .route(
            "/config",
            get(handlers::get_config)
                .post(handlers::save_config)
                .delete(handlers::delete_config),
        )
        .with_state(state);

    Router::new()
        .route("/", get(handlers::root))
        .route("/livez", get(handlers::livez))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
}

/// Inbound request timeout, never shorter than the upstream timeout plus
/// headroom.
fn inbound_timeout(configured_secs: u64) -> Duration {
    let floor = REQUEST_TIMEOUT + INBOUND_TIMEOUT_HEADROOM;
    let configured = Duration::from_secs(configured_secs);
    if configured < floor {
        warn!(
            configured_secs,
            floor_secs = floor.as_secs(),
            "gateway.requestTimeoutSecs is below the upstream timeout, raising it"
        );
        floor
    } else {
        configured
    }
}

/// Build the application state from configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let router = ChatRouter::new(config).context("failed to build HTTP client")?;
    let store = open_store(config)?;

    Ok(AppState {
        router,
        store,
        user_header: config.identity.user_header.to_ascii_lowercase(),
    })
}

fn open_store(config: &Config) -> Result<Arc<dyn ConfigStore>> {
    match config.store.path.as_deref() {
        Some(path) => {
            let path = helpers::expand_tilde(path);
            let store = FileConfigStore::open(&path)
                .with_context(|| format!("failed to open config store: {}", path.display()))?;
            info!(path = %store.path().display(), "Using file config store");
            Ok(Arc::new(store))
        }
        None => {
            info!("Using in-memory config store");
            Ok(Arc::new(MemoryConfigStore::new()))
        }
    }
}

/// Run the gateway until Ctrl+C.
pub async fn run() -> Result<()> {
    helpers::print_banner();

    let config = load_config(None);
    let state = build_state(&config)?;
    let app = build_app(state, config.gateway.request_timeout_secs);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!("  {} listening on http://{}", "✓".green(), addr);
    println!(
        "  {} store: {}",
        "✓".green(),
        config.store.path.as_deref().unwrap_or("in-memory")
    );
    println!();
    info!(%addr, "Gateway started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    println!("  Gateway stopped. Goodbye!");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    println!();
    println!("  Shutting down...");
    info!("received Ctrl+C, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_timeout_floor() {
        assert_eq!(inbound_timeout(90), Duration::from_secs(90));
        assert_eq!(inbound_timeout(65), Duration::from_secs(65));
        assert_eq!(inbound_timeout(10), Duration::from_secs(65));
        assert_eq!(inbound_timeout(0), REQUEST_TIMEOUT + INBOUND_TIMEOUT_HEADROOM);
    }

    #[test]
    fn test_build_state_memory_store() {
        let state = build_state(&Config::default()).unwrap();
        assert_eq!(state.user_header, "x-user-id");
    }

    #[tokio::test]
    async fn test_build_state_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.path = Some(dir.path().join("store.json").to_string_lossy().into_owned());
        config.identity.user_header = "X-Auth-User".to_string();

        let state = build_state(&config).unwrap();
        assert_eq!(state.user_header, "x-auth-user");
        assert!(state.store.get("nobody").await.unwrap().is_none());
    }
}
