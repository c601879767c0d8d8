//! Core types for Sonora — the normalized conversation every provider call starts from.
//!
//! These are the shapes callers send in and get back, independent of any
//! provider's wire format. Field names on the wire follow the public chat API
//! (`message`, `config.apiKey`, `response`); Rust uses descriptive snake_case.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────
// Conversation
// ─────────────────────────────────────────────

/// Speaker of a conversation message.
///
/// The set is closed. Any other role string fails deserialization, so a
/// request with `"role": "tool"` or `"role": "User"` is rejected at the
/// boundary instead of being coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name of the role (`"system"`, `"user"`, `"assistant"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a caller-supplied conversation, in chronological order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Model selection
// ─────────────────────────────────────────────

/// Which provider and model to call, and the caller's credential for it.
///
/// Immutable for the lifetime of a request. The `Debug` impl never prints the
/// credential, so a selection can be logged or traced safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    /// Provider identifier (e.g. `"openai"`, `"google"`).
    pub provider: String,
    /// Model identifier as the provider knows it.
    pub model: String,
    /// API key for the provider.
    #[serde(rename = "apiKey")]
    pub credential: String,
}

impl ModelSelection {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            credential: credential.into(),
        }
    }

    /// Whether a credential was supplied at all.
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}

impl fmt::Debug for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSelection")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("credential", &"<redacted>")
            .finish()
    }
}

// ─────────────────────────────────────────────
// Chat request / result
// ─────────────────────────────────────────────

/// A single chat call: the new user message, where to send it, and the
/// conversation so far.
///
/// History is supplied by the caller on every call; nothing is kept between
/// requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "message")]
    pub new_message: String,
    #[serde(rename = "config")]
    pub selection: ModelSelection,
    #[serde(default)]
    pub history: Vec<ConversationMessage>,
}

impl ChatRequest {
    pub fn new(new_message: impl Into<String>, selection: ModelSelection) -> Self {
        Self {
            new_message: new_message.into(),
            selection,
            history: Vec::new(),
        }
    }

    /// Attach prior conversation turns.
    pub fn with_history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Normalized reply, the same shape whichever provider produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(rename = "response")]
    pub reply_text: String,
    pub provider: String,
    pub model: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
