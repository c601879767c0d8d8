//! Provider clients — one outbound HTTP call per chat, one function per family.
//!
//! Each `send_*` function builds the URL from the descriptor, attaches the
//! credential where the provider expects it, POSTs the family's request body
//! exactly once, and pulls the reply text out of the family's envelope.
//!
//! Failure mapping:
//! - non-2xx → [`ChatError::Upstream`] with the body verbatim
//! - 2xx without a string at the reply path, or not JSON →
//!   [`ChatError::MalformedUpstreamResponse`]
//! - connect/TLS/timeout → [`ChatError::Transport`] (URL stripped)

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use sonora_core::config::schema::ChatDefaults;

use crate::error::ChatError;
use crate::registry::{AuthPlacement, ProviderDescriptor};
use crate::translate::{AnthropicPayload, ChatMessage, CoherePayload, GeminiPayload};

/// Fixed timeout for every upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the shared HTTP client used for all upstream calls.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    http_client_with_timeout(REQUEST_TIMEOUT)
}

pub(crate) fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

// ─────────────────────────────────────────────
// Call parameters
// ─────────────────────────────────────────────

/// Generation parameters for families whose request body carries them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        ChatDefaults::default().into()
    }
}

impl From<ChatDefaults> for GenerationParams {
    fn from(defaults: ChatDefaults) -> Self {
        Self {
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

/// Where one call goes and with which credential.
pub struct CallTarget<'a> {
    pub descriptor: &'static ProviderDescriptor,
    /// Base URL override from configuration.
    pub base_override: Option<&'a str>,
    pub model: &'a str,
    pub credential: &'a str,
}

impl std::fmt::Debug for CallTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallTarget")
            .field("provider", &self.descriptor.id)
            .field("base_override", &self.base_override)
            .field("model", &self.model)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Serialize)]
struct CohereRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    payload: &'a CoherePayload<'a>,
}

// ─────────────────────────────────────────────
// Response envelopes
// ─────────────────────────────────────────────

// Reply fields are `Option<String>`: a missing or null field is reported as
// malformed, a non-string value fails deserialization.

#[derive(Deserialize)]
struct OpenAiEnvelope {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiReply>,
}

#[derive(Deserialize)]
struct OpenAiReply {
    content: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicEnvelope {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiEnvelope {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
}

#[derive(Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct CohereEnvelope {
    text: Option<String>,
}

// ─────────────────────────────────────────────
// Family dispatch functions
// ─────────────────────────────────────────────

/// OpenAI-compatible: reply at `choices[0].message.content`.
pub async fn send_openai(
    client: &reqwest::Client,
    target: &CallTarget<'_>,
    messages: &[ChatMessage<'_>],
    params: GenerationParams,
) -> Result<String, ChatError> {
    let body = OpenAiRequest {
        model: target.model,
        messages,
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    };

    let envelope: OpenAiEnvelope = post_json(client, target, &body, messages.len()).await?;
    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| missing_field(target, "choices[0].message.content"))
}

/// Anthropic: reply at `content[0].text`.
pub async fn send_anthropic(
    client: &reqwest::Client,
    target: &CallTarget<'_>,
    payload: &AnthropicPayload<'_>,
    params: GenerationParams,
) -> Result<String, ChatError> {
    let body = AnthropicRequest {
        model: target.model,
        messages: &payload.messages,
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        system: payload.system,
    };

    let envelope: AnthropicEnvelope =
        post_json(client, target, &body, payload.messages.len()).await?;
    envelope
        .content
        .into_iter()
        .next()
        .and_then(|b| b.text)
        .ok_or_else(|| missing_field(target, "content[0].text"))
}

/// Gemini: reply at `candidates[0].content.parts[0].text`.
pub async fn send_gemini(
    client: &reqwest::Client,
    target: &CallTarget<'_>,
    payload: &GeminiPayload<'_>,
) -> Result<String, ChatError> {
    let envelope: GeminiEnvelope =
        post_json(client, target, payload, payload.contents.len()).await?;
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| missing_field(target, "candidates[0].content.parts[0].text"))
}

/// Cohere: reply at `text`.
pub async fn send_cohere(
    client: &reqwest::Client,
    target: &CallTarget<'_>,
    payload: &CoherePayload<'_>,
) -> Result<String, ChatError> {
    let body = CohereRequest {
        model: target.model,
        payload,
    };

    let envelope: CohereEnvelope =
        post_json(client, target, &body, payload.chat_history.len() + 1).await?;
    envelope.text.ok_or_else(|| missing_field(target, "text"))
}

// ─────────────────────────────────────────────
// Shared HTTP plumbing
// ─────────────────────────────────────────────

/// POST `body` once and decode a 2xx JSON envelope.
async fn post_json<B, R>(
    client: &reqwest::Client,
    target: &CallTarget<'_>,
    body: &B,
    message_count: usize,
) -> Result<R, ChatError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let provider = target.descriptor.id;
    let url = target.descriptor.request_url(target.base_override, target.model);

    debug!(
        provider,
        model = target.model,
        family = %target.descriptor.family,
        messages = message_count,
        "Calling provider"
    );

    let mut request = client.post(&url).header(CONTENT_TYPE, "application/json");

    request = match target.descriptor.auth {
        AuthPlacement::BearerHeader => request.bearer_auth(target.credential),
        AuthPlacement::CustomHeader(name) => request.header(name, target.credential),
        AuthPlacement::QueryParam(name) => request.query(&[(name, target.credential)]),
    };

    for (name, value) in target.descriptor.extra_headers {
        request = request.header(*name, *value);
    }

    let response = request.json(body).send().await.map_err(|e| {
        let err = ChatError::transport(provider, e);
        error!(provider, error = %err, "HTTP request failed");
        err
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ChatError::transport(provider, e))?;

    if !status.is_success() {
        error!(provider, status = status.as_u16(), body = %text, "Provider API error");
        return Err(ChatError::Upstream {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        error!(provider, error = %e, "Failed to parse provider response");
        ChatError::malformed(provider, format!("unexpected response body: {e}"))
    })
}

fn missing_field(target: &CallTarget<'_>, path: &str) -> ChatError {
    error!(provider = target.descriptor.id, field = path, "Reply field missing");
    ChatError::malformed(target.descriptor.id, format!("missing {path}"))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
