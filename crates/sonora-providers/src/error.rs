//! Chat error taxonomy.
//!
//! Every failure of a chat call is one of these variants, and each one has a
//! stable `kind()` string for the HTTP boundary. Messages never contain the
//! caller's credential.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The provider id is not in the registry. Raised before any network I/O.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The request is missing something required (credential, model, message).
    /// Raised before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered with a non-2xx status. `body` is kept verbatim.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The provider answered 2xx but the reply text could not be extracted.
    #[error("malformed response from {provider}: {reason}")]
    MalformedUpstreamResponse { provider: String, reason: String },

    /// Connection failure, TLS failure, or timeout. The source has its URL
    /// stripped.
    #[error("transport error calling {provider}: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ChatError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::UnsupportedProvider(_) => "unsupported_provider",
            ChatError::InvalidRequest(_) => "invalid_request",
            ChatError::Upstream { .. } => "upstream_error",
            ChatError::MalformedUpstreamResponse { .. } => "malformed_upstream_response",
            ChatError::Transport { .. } => "transport_error",
        }
    }

    /// Whether this is a transport error caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Transport { source, .. } if source.is_timeout())
    }

    pub(crate) fn malformed(provider: &str, reason: impl Into<String>) -> Self {
        ChatError::MalformedUpstreamResponse {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transport(provider: &str, source: reqwest::Error) -> Self {
        ChatError::Transport {
            provider: provider.to_string(),
            source: source.without_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            ChatError::UnsupportedProvider("azure".into()).kind(),
            "unsupported_provider"
        );
        assert_eq!(ChatError::InvalidRequest("x".into()).kind(), "invalid_request");
        assert_eq!(
            ChatError::Upstream {
                status: 429,
                body: "{}".into()
            }
            .kind(),
            "upstream_error"
        );
        assert_eq!(
            ChatError::malformed("openai", "missing field").kind(),
            "malformed_upstream_response"
        );
    }

    #[test]
    fn test_display() {
        let err = ChatError::Upstream {
            status: 429,
            body: r#"{"error":"rate limited"}"#.into(),
        };
        assert_eq!(err.to_string(), r#"upstream returned 429: {"error":"rate limited"}"#);

        let err = ChatError::UnsupportedProvider("azure".into());
        assert_eq!(err.to_string(), "unsupported provider: azure");
        assert!(!err.is_timeout());
    }
}
