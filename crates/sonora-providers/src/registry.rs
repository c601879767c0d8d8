//! Provider registry — static descriptors for all 7 supported LLM providers.
//!
//! Each `ProviderDescriptor` says how to reach one upstream API: base URL and
//! path, where the credential goes, which extra headers are required, and
//! which wire family its request/response bodies belong to.
//!
//! Adding a provider means adding one entry to [`PROVIDERS`].

use std::fmt;

// ─────────────────────────────────────────────
// Descriptor types
// ─────────────────────────────────────────────

/// Providers sharing one request/response wire shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// `/chat/completions` with `messages` in, `choices[0].message.content` out.
    OpenAiCompatible,
    /// Messages API with a top-level `system` field.
    Anthropic,
    /// `generateContent` with `contents[].parts[].text`.
    Gemini,
    /// Chat API with `message` + `chat_history`.
    Cohere,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::OpenAiCompatible => "openai-compatible",
            Family::Anthropic => "anthropic",
            Family::Gemini => "gemini",
            Family::Cohere => "cohere",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the caller's credential is attached to the outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPlacement {
    /// `Authorization: Bearer <key>`.
    BearerHeader,
    /// A provider-specific header, e.g. `x-api-key: <key>`.
    CustomHeader(&'static str),
    /// A query string parameter, e.g. `?key=<key>`.
    QueryParam(&'static str),
}

/// One entry of a provider's model catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Static description of one upstream provider.
#[derive(Clone, Debug)]
pub struct ProviderDescriptor {
    /// Normalized identifier (e.g. `"openrouter"`).
    pub id: &'static str,
    /// Human-readable name for listings. E.g. `"Anthropic (Claude)"`.
    pub display_name: &'static str,
    pub family: Family,
    /// Default API base URL, without trailing `/`.
    pub api_base: &'static str,
    /// Path appended to the base. May contain a `{model}` placeholder.
    pub path: &'static str,
    pub auth: AuthPlacement,
    /// Headers sent on every request besides auth and `Content-Type`.
    pub extra_headers: &'static [(&'static str, &'static str)],
    /// Known models, for listings only. Any model id is accepted on requests.
    pub models: &'static [ModelInfo],
}

impl ProviderDescriptor {
    /// Build the full request URL.
    ///
    /// `base_override` replaces the default base (e.g. a local proxy or a mock
    /// server). A trailing `/` on the base is ignored; `{model}` in the path
    /// is replaced with `model`.
    pub fn request_url(&self, base_override: Option<&str>, model: &str) -> String {
        let base = base_override.unwrap_or(self.api_base).trim_end_matches('/');
        let path = self.path.replace("{model}", model);
        format!("{}{}", base, path)
    }

    /// Look up a model in this provider's catalog.
    pub fn find_model(&self, model_id: &str) -> Option<&'static ModelInfo> {
        self.models.iter().find(|m| m.id == model_id)
    }
}

// ─────────────────────────────────────────────
// All 7 providers
// ─────────────────────────────────────────────

/// Complete list of supported providers, in listing order.
pub static PROVIDERS: &[ProviderDescriptor] = &[
    // 1. OpenAI
    ProviderDescriptor {
        id: "openai",
        display_name: "OpenAI",
        family: Family::OpenAiCompatible,
        api_base: "https://api.openai.com/v1",
        path: "/chat/completions",
        auth: AuthPlacement::BearerHeader,
        extra_headers: &[],
        models: &[
            ModelInfo { id: "gpt-4o", name: "GPT-4o" },
            ModelInfo { id: "gpt-4o-mini", name: "GPT-4o Mini" },
            ModelInfo { id: "gpt-4-turbo", name: "GPT-4 Turbo" },
            ModelInfo { id: "gpt-4", name: "GPT-4" },
            ModelInfo { id: "gpt-3.5-turbo", name: "GPT-3.5 Turbo" },
        ],
    },
    // 2. Anthropic — custom auth header + pinned API version
    ProviderDescriptor {
        id: "anthropic",
        display_name: "Anthropic (Claude)",
        family: Family::Anthropic,
        api_base: "https://api.anthropic.com/v1",
        path: "/messages",
        auth: AuthPlacement::CustomHeader("x-api-key"),
        extra_headers: &[("anthropic-version", "2023-06-01")],
        models: &[
            ModelInfo { id: "claude-3-5-sonnet-20241022", name: "Claude 3.5 Sonnet" },
            ModelInfo { id: "claude-3-opus-20240229", name: "Claude 3 Opus" },
            ModelInfo { id: "claude-3-sonnet-20240229", name: "Claude 3 Sonnet" },
            ModelInfo { id: "claude-3-haiku-20240307", name: "Claude 3 Haiku" },
        ],
    },
    // 3. Google Gemini — model in the path, key in the query string
    ProviderDescriptor {
        id: "google",
        display_name: "Google (Gemini)",
        family: Family::Gemini,
        api_base: "https://generativelanguage.googleapis.com/v1beta",
        path: "/models/{model}:generateContent",
        auth: AuthPlacement::QueryParam("key"),
        extra_headers: &[],
        models: &[
            ModelInfo { id: "gemini-2.0-flash-exp", name: "Gemini 2.0 Flash" },
            ModelInfo { id: "gemini-1.5-pro", name: "Gemini 1.5 Pro" },
            ModelInfo { id: "gemini-1.5-flash", name: "Gemini 1.5 Flash" },
            ModelInfo { id: "gemini-pro", name: "Gemini Pro" },
        ],
    },
    // 4. Mistral
    ProviderDescriptor {
        id: "mistral",
        display_name: "Mistral AI",
        family: Family::OpenAiCompatible,
        api_base: "https://api.mistral.ai/v1",
        path: "/chat/completions",
        auth: AuthPlacement::BearerHeader,
        extra_headers: &[],
        models: &[
            ModelInfo { id: "mistral-large-latest", name: "Mistral Large" },
            ModelInfo { id: "mistral-medium-latest", name: "Mistral Medium" },
            ModelInfo { id: "mistral-small-latest", name: "Mistral Small" },
            ModelInfo { id: "open-mistral-7b", name: "Mistral 7B" },
            ModelInfo { id: "open-mixtral-8x7b", name: "Mixtral 8x7B" },
        ],
    },
    // 5. Cohere
    ProviderDescriptor {
        id: "cohere",
        display_name: "Cohere",
        family: Family::Cohere,
        api_base: "https://api.cohere.ai/v1",
        path: "/chat",
        auth: AuthPlacement::BearerHeader,
        extra_headers: &[],
        models: &[
            ModelInfo { id: "command-r-plus", name: "Command R+" },
            ModelInfo { id: "command-r", name: "Command R" },
            ModelInfo { id: "command", name: "Command" },
            ModelInfo { id: "command-light", name: "Command Light" },
        ],
    },
    // 6. Groq — OpenAI-compatible under /openai
    ProviderDescriptor {
        id: "groq",
        display_name: "Groq",
        family: Family::OpenAiCompatible,
        api_base: "https://api.groq.com/openai/v1",
        path: "/chat/completions",
        auth: AuthPlacement::BearerHeader,
        extra_headers: &[],
        models: &[
            ModelInfo { id: "llama-3.3-70b-versatile", name: "Llama 3.3 70B" },
            ModelInfo { id: "llama-3.1-70b-versatile", name: "Llama 3.1 70B" },
            ModelInfo { id: "llama-3.1-8b-instant", name: "Llama 3.1 8B" },
            ModelInfo { id: "mixtral-8x7b-32768", name: "Mixtral 8x7B" },
            ModelInfo { id: "gemma2-9b-it", name: "Gemma 2 9B" },
        ],
    },
    // 7. OpenRouter — gateway, requires a referer
    ProviderDescriptor {
        id: "openrouter",
        display_name: "OpenRouter",
        family: Family::OpenAiCompatible,
        api_base: "https://openrouter.ai/api/v1",
        path: "/chat/completions",
        auth: AuthPlacement::BearerHeader,
        extra_headers: &[("HTTP-Referer", "http://localhost:5173")],
        models: &[
            ModelInfo { id: "anthropic/claude-3.5-sonnet", name: "Claude 3.5 Sonnet" },
            ModelInfo { id: "openai/gpt-4-turbo", name: "GPT-4 Turbo" },
            ModelInfo { id: "google/gemini-pro-1.5", name: "Gemini Pro 1.5" },
            ModelInfo { id: "meta-llama/llama-3.1-70b-instruct", name: "Llama 3.1 70B" },
            ModelInfo { id: "mistralai/mistral-large", name: "Mistral Large" },
        ],
    },
];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// Normalize a caller-supplied provider id (`" OpenAI "` → `"openai"`).
pub fn normalize_provider_id(provider_id: &str) -> String {
    provider_id.trim().to_ascii_lowercase()
}

/// Find a provider descriptor by id. The id is normalized first.
pub fn lookup(provider_id: &str) -> Option<&'static ProviderDescriptor> {
    let id = normalize_provider_id(provider_id);
    PROVIDERS.iter().find(|p| p.id == id)
}

/// Ids of all supported providers, in listing order.
pub fn provider_ids() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.id).collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
