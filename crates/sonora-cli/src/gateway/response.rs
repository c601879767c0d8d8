//! Error responses for the HTTP gateway.
//!
//! Every failure is rendered as `{"error": {"kind", "message", "status"?, "body"?}}`.
//!
//! | error                         | HTTP status                          |
//! |-------------------------------|--------------------------------------|
//! | unsupported provider, invalid | 400                                  |
//! | upstream error                | upstream status (502 if not 4xx/5xx) |
//! | malformed upstream response   | 502                                  |
//! | transport                     | 504 on timeout, else 502             |
//! | missing identity              | 401                                  |
//! | unknown provider in a listing | 404                                  |
//! | store failure                 | 500                                  |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use sonora_core::store::StoreError;
use sonora_providers::ChatError;

/// Anything a gateway handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Chat(ChatError),
    Store(StoreError),
    Unauthorized(String),
    NotFound(String),
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::Chat(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Chat(e) => match e {
                ChatError::UnsupportedProvider(_) | ChatError::InvalidRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                ChatError::Upstream { status, .. } => StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                ChatError::MalformedUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
                ChatError::Transport { .. } if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                ChatError::Transport { .. } => StatusCode::BAD_GATEWAY,
            },
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Chat(e) => {
                let (status, body) = match e {
                    ChatError::Upstream { status, body } => (Some(*status), Some(body.clone())),
                    _ => (None, None),
                };
                ErrorBody {
                    kind: e.kind(),
                    message: e.to_string(),
                    status,
                    body,
                }
            }
            ApiError::Store(e) => ErrorBody {
                kind: "store_error",
                message: e.to_string(),
                status: None,
                body: None,
            },
            ApiError::Unauthorized(msg) => ErrorBody {
                kind: "unauthorized",
                message: msg.clone(),
                status: None,
                body: None,
            },
            ApiError::NotFound(msg) => ErrorBody {
                kind: "not_found",
                message: msg.clone(),
                status: None,
                body: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.body();

        if status.is_server_error() {
            error!(kind = body.kind, status = status.as_u16(), message = %body.message, "Request failed");
        } else {
            warn!(kind = body.kind, status = status.as_u16(), message = %body.message, "Request rejected");
        }

        (status, Json(ErrorEnvelope { error: body })).into_response()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> ApiError {
        ApiError::Chat(ChatError::Upstream {
            status,
            body: "x".to_string(),
        })
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Chat(ChatError::UnsupportedProvider("azure".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Chat(ChatError::InvalidRequest("no key".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Chat(ChatError::MalformedUpstreamResponse {
                provider: "openai".into(),
                reason: "missing".into()
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Unauthorized("no user".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        assert_eq!(upstream(429).status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream(401).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(upstream(503).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        // Not an error status
        assert_eq!(upstream(302).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream(42).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_body_included() {
        let body = upstream(429).body();
        assert_eq!(body.kind, "upstream_error");
        assert_eq!(body.status, Some(429));
        assert_eq!(body.body.as_deref(), Some("x"));
    }
}
