//! Normalized JSON error responses for the gateway routes.
//!
//! Taxonomy (matching the upstream proxy contract):
//! - missing input        → 400, `{"error": ...}`
//! - missing credential   → 500, fixed configuration message
//! - upstream non-2xx     → upstream status relayed, message extracted
//! - network/parse faults → 500, generic internal message

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors surfaced by the gateway's API routes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required query parameter is absent.
    #[error("{0}")]
    MissingParam(&'static str),

    /// A server-held credential is not configured.
    #[error("{0}")]
    Configuration(&'static str),

    /// The third-party provider answered with an error.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Anything else: network failure, undecodable body.
    #[error("An internal server error occurred.")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, message } => ApiError::Upstream { status, message },
            UpstreamError::Transport(e) => {
                tracing::error!(error = %e, "Upstream request failed");
                ApiError::Internal
            }
            UpstreamError::Decode(e) => {
                tracing::error!(error = %e, "Upstream response undecodable");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MissingParam("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Configuration("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Upstream {
                status: 429,
                message: "rate limited".into()
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        // Nonsense upstream statuses degrade to 502 rather than panicking
        assert_eq!(
            ApiError::Upstream {
                status: 7,
                message: "?".into()
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_upstream_error_conversion_preserves_message() {
        let err: ApiError = UpstreamError::Status {
            status: 404,
            message: "Invalid address".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid address");
    }
}
