//! Gateway error taxonomy.
//!
//! Every handler failure converts into a JSON error body; nothing escapes
//! as an unhandled fault. Validation failures never reach the upstream.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::translator::TranslateError;

/// Request-level failures, mapped to HTTP status + JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed height path parameter. No upstream call is made.
    #[error("Invalid height parameter. Must be a valid number.")]
    InvalidHeight,

    /// Malformed version path parameter. No upstream call is made.
    #[error("Invalid version parameter. Must be a valid number.")]
    InvalidVersion,

    /// Malformed request body or query input.
    #[error("{0}")]
    InvalidInput(String),

    /// Request shape the gateway deliberately does not serve.
    #[error("{0}")]
    NotImplemented(String),

    /// Upstream fetch or translation failure.
    #[error("{message}")]
    Upstream { message: String, detail: String },
}

impl ApiError {
    /// Wrap an upstream failure with a caller-facing message.
    pub fn upstream(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ApiError::Upstream {
            message: message.into(),
            detail: err.to_string(),
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        ApiError::upstream("Failed to translate upstream chain data", err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidHeight => (
                StatusCode::BAD_REQUEST,
                json!({
                    "status": "error",
                    "message": self.to_string(),
                }),
            ),
            ApiError::InvalidVersion => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": self.to_string(),
                    "error_code": "invalid_version",
                }),
            ),
            ApiError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": self.to_string(),
                    "error_code": "invalid_input",
                }),
            ),
            ApiError::NotImplemented(_) => (
                StatusCode::NOT_IMPLEMENTED,
                json!({
                    "message": self.to_string(),
                    "error_code": "not_implemented",
                }),
            ),
            ApiError::Upstream { detail, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": self.to_string(),
                    "error_code": "internal_error",
                    "vm_error_code": detail,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_height_message_is_exact() {
        assert_eq!(
            ApiError::InvalidHeight.to_string(),
            "Invalid height parameter. Must be a valid number."
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidHeight.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidVersion.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotImplemented("bcs".into()).into_response().status(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ApiError::upstream("boom", "detail").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
