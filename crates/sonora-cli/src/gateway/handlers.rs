//! HTTP request handlers.

use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use sonora_core::types::{ChatRequest, ChatResult, ModelSelection};
use sonora_providers::registry::{self, ModelInfo, PROVIDERS};
use sonora_providers::ChatError;

use super::response::ApiError;
use super::AppState;

// ─────────────────────────────────────────────
// Response types
// ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProviderSummary {
    id: &'static str,
    name: &'static str,
}

#[derive(Serialize)]
pub struct ProvidersResponse {
    providers: Vec<ProviderSummary>,
}

#[derive(Serialize)]
pub struct ModelSummary {
    id: &'static str,
    name: &'static str,
}

impl From<&ModelInfo> for ModelSummary {
    fn from(m: &ModelInfo) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

#[derive(Serialize)]
pub struct ModelsResponse {
    provider: &'static str,
    models: Vec<ModelSummary>,
}

#[derive(Serialize)]
pub struct AckResponse {
    success: bool,
    message: &'static str,
}

// ─────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────

/// Authenticated user id, read from the configured identity header.
///
/// The header is set by the auth middleware in front of the gateway; a
/// missing or blank header is rejected with 401.
pub struct UserId(pub String);

impl FromRequestParts<AppState> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(state.user_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| UserId(v.to_string()))
            .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", state.user_header)))
    }
}

// ─────────────────────────────────────────────
// Info & health
// ─────────────────────────────────────────────

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Sonora API - Universal AI Proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "supported_providers": registry::provider_ids(),
    }))
}

/// GET /livez
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// GET /api/providers
pub async fn list_providers() -> Json<ProvidersResponse> {
    let providers = PROVIDERS
        .iter()
        .map(|p| ProviderSummary {
            id: p.id,
            name: p.display_name,
        })
        .collect();
    Json(ProvidersResponse { providers })
}

/// GET /api/models/{provider}
pub async fn list_models(Path(provider): Path<String>) -> Result<Json<ModelsResponse>, ApiError> {
    let desc = registry::lookup(&provider)
        .ok_or_else(|| ApiError::NotFound(format!("Provider '{}' not found", provider)))?;

    Ok(Json(ModelsResponse {
        provider: desc.id,
        models: desc.models.iter().map(ModelSummary::from).collect(),
    }))
}

// ─────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResult>, ApiError> {
    debug!(
        provider = %req.selection.provider,
        model = %req.selection.model,
        history = req.history.len(),
        "Chat request"
    );

    let result = state.router.chat(&req).await?;
    Ok(Json(result))
}

// ─────────────────────────────────────────────
// Per-user config
// ─────────────────────────────────────────────

/// GET /api/config — `null` when the user has no saved selection.
pub async fn get_config(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Option<ModelSelection>>, ApiError> {
    let selection = state.store.get(&user_id).await?;
    Ok(Json(selection))
}

/// POST /api/config
pub async fn save_config(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(mut selection): Json<ModelSelection>,
) -> Result<Json<AckResponse>, ApiError> {
    let desc = registry::lookup(&selection.provider).ok_or_else(|| {
        ChatError::UnsupportedProvider(registry::normalize_provider_id(&selection.provider))
    })?;
    selection.provider = desc.id.to_string();

    state.store.upsert(&user_id, selection).await?;
    info!(provider = desc.id, "Saved model selection");

    Ok(Json(AckResponse {
        success: true,
        message: "Configuration saved",
    }))
}

/// DELETE /api/config
pub async fn delete_config(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<AckResponse>, ApiError> {
    state.store.delete(&user_id).await?;
    Ok(Json(AckResponse {
        success: true,
        message: "Configuration deleted",
    }))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
