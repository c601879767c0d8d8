//! Chat router — the single entry point for a chat call.
//!
//! `validate → translate → dispatch → normalize`. The router picks the
//! translator/client pair from the descriptor's [`Family`] and returns a
//! [`ChatResult`] with the normalized provider id. Errors from the client are
//! propagated unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use sonora_core::config::Config;
use sonora_core::types::{ChatRequest, ChatResult};

use crate::client::{self, CallTarget, GenerationParams};
use crate::error::ChatError;
use crate::registry::{self, Family, ProviderDescriptor};
use crate::translate;

/// Routes chat requests to the right provider.
///
/// Cheap to clone: the HTTP client is reference-counted and the base URL
/// overrides are shared behind an `Arc`.
#[derive(Clone)]
pub struct ChatRouter {
    http: reqwest::Client,
    base_overrides: Arc<HashMap<&'static str, String>>,
    params: GenerationParams,
}

impl std::fmt::Debug for ChatRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRouter")
            .field("base_overrides", &self.base_overrides)
            .field("params", &self.params)
            .finish()
    }
}

impl ChatRouter {
    /// Build a router from configuration: base URL overrides for known
    /// providers and generation parameters.
    ///
    /// Overrides for ids that aren't in the registry are ignored with a warning.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(client::build_http_client()?, config))
    }

    /// Build a router around an existing HTTP client.
    ///
    /// The client's own timeout applies in place of [`client::REQUEST_TIMEOUT`].
    pub fn with_client(http: reqwest::Client, config: &Config) -> Self {
        let mut base_overrides = HashMap::new();
        for (id, endpoint) in &config.providers {
            let Some(base) = endpoint.api_base.as_deref() else {
                continue;
            };
            match registry::lookup(id) {
                Some(desc) => {
                    debug!(provider = desc.id, api_base = base, "Using custom API base");
                    base_overrides.insert(desc.id, base.to_string());
                }
                None => warn!("Ignoring API base override for unknown provider '{}'", id),
            }
        }

        Self {
            http,
            base_overrides: Arc::new(base_overrides),
            params: config.chat.clone().into(),
        }
    }

    /// Base URL override for a provider, if configured.
    pub fn base_override(&self, provider_id: &str) -> Option<&str> {
        self.base_overrides.get(provider_id).map(String::as_str)
    }

    /// Run one chat call.
    ///
    /// Unknown providers and requests with an empty credential, model or
    /// message fail before any network I/O.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResult, ChatError> {
        let selection = &request.selection;
        let descriptor = registry::lookup(&selection.provider)
            .ok_or_else(|| ChatError::UnsupportedProvider(registry::normalize_provider_id(&selection.provider)))?;

        validate(request)?;

        let target = CallTarget {
            descriptor,
            base_override: self.base_override(descriptor.id),
            model: &selection.model,
            credential: &selection.credential,
        };

        let reply_text = self.dispatch(descriptor, &target, request).await?;

        info!(
            provider = descriptor.id,
            model = %selection.model,
            reply_len = reply_text.len(),
            "Chat completed"
        );

        Ok(ChatResult {
            reply_text,
            provider: descriptor.id.to_string(),
            model: selection.model.clone(),
        })
    }

    async fn dispatch(
        &self,
        descriptor: &'static ProviderDescriptor,
        target: &CallTarget<'_>,
        request: &ChatRequest,
    ) -> Result<String, ChatError> {
        let history = &request.history;
        let message = &request.new_message;

        match descriptor.family {
            Family::OpenAiCompatible => {
                let messages = translate::to_openai(history, message);
                client::send_openai(&self.http, target, &messages, self.params).await
            }
            Family::Anthropic => {
                let payload = translate::to_anthropic(history, message);
                client::send_anthropic(&self.http, target, &payload, self.params).await
            }
            Family::Gemini => {
                let payload = translate::to_gemini(history, message);
                client::send_gemini(&self.http, target, &payload).await
            }
            Family::Cohere => {
                let payload = translate::to_cohere(history, message);
                client::send_cohere(&self.http, target, &payload).await
            }
        }
    }
}

fn validate(request: &ChatRequest) -> Result<(), ChatError> {
    if !request.selection.has_credential() {
        return Err(ChatError::InvalidRequest("API key is required".to_string()));
    }
    if request.selection.model.trim().is_empty() {
        return Err(ChatError::InvalidRequest("model is required".to_string()));
    }
    if request.new_message.trim().is_empty() {
        return Err(ChatError::InvalidRequest("message must not be empty".to_string()));
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
