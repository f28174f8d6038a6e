//! Gateway error envelope.
//!
//! Every failure a handler can return, with its HTTP status and stable
//! gateway error code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::backend::{BackendKind, RpcCode};
use crate::normalize::NormalizeError;

use super::types::{ApiResponse, error_codes};
use super::validation::IdentifierError;

/// Message for backend rejections that carry an unclassified code.
pub const GENERIC_REJECTION: &str = "request rejected by backend service";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("{operation} is not supported for {resource}")]
    UnsupportedOperation { resource: String, operation: String },

    /// Backend code 5
    #[error("{message}")]
    NotFound { message: String, detail: Option<String> },

    /// Backend code 3
    #[error("{message}")]
    InvalidArgument { message: String, detail: Option<String> },

    /// Backend code 6
    #[error("{message}")]
    Conflict { message: String, detail: Option<String> },

    /// Any other backend code
    #[error("request rejected by backend service")]
    Rejected { code: RpcCode, detail: Option<String> },

    #[error("{0} backend is not available")]
    BackendUnavailable(BackendKind),

    /// Code-less backend failure; the message is passed through unchanged.
    #[error("{message}")]
    Transport { message: String, detail: Option<String> },
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Normalize(_)
            | GatewayError::InvalidIdentifier(_)
            | GatewayError::InvalidBody(_)
            | GatewayError::InvalidArgument { .. }
            | GatewayError::Conflict { .. }
            | GatewayError::Rejected { .. } => StatusCode::BAD_REQUEST,
            GatewayError::UnknownResource(_) | GatewayError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            GatewayError::UnsupportedOperation { .. } => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            GatewayError::Normalize(NormalizeError::MissingRequiredField(_)) => {
                error_codes::MISSING_FIELD
            }
            GatewayError::Normalize(_) => error_codes::INVALID_FIELD,
            GatewayError::InvalidIdentifier(_) => error_codes::INVALID_IDENTIFIER,
            GatewayError::InvalidBody(_) => error_codes::INVALID_BODY,
            GatewayError::UnknownResource(_) => error_codes::UNKNOWN_RESOURCE,
            GatewayError::UnsupportedOperation { .. } => error_codes::UNSUPPORTED_OPERATION,
            GatewayError::NotFound { .. } => error_codes::NOT_FOUND,
            GatewayError::InvalidArgument { .. } => error_codes::INVALID_ARGUMENT,
            GatewayError::Conflict { .. } => error_codes::ALREADY_EXISTS,
            GatewayError::Rejected { .. } => error_codes::BACKEND_REJECTED,
            GatewayError::BackendUnavailable(_) => error_codes::SERVICE_UNAVAILABLE,
            GatewayError::Transport { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// Backend detail surfaced to the caller. Unclassified rejections keep
    /// theirs out of the response body; it is only logged.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::NotFound { detail, .. }
            | GatewayError::InvalidArgument { detail, .. }
            | GatewayError::Conflict { detail, .. }
            | GatewayError::Transport { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.code(), self.to_string())
            .with_detail(self.detail().map(str::to_string));
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_status_mapping() {
        let missing = GatewayError::from(NormalizeError::MissingRequiredField("account_code".into()));
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.code(), error_codes::MISSING_FIELD);
        assert_eq!(missing.to_string(), "account_code is required");

        assert_eq!(
            GatewayError::UnknownResource("Nope".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::UnsupportedOperation {
                resource: "TrialBalance".into(),
                operation: "create".into()
            }
            .status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            GatewayError::BackendUnavailable(BackendKind::Crm).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::Transport {
                message: "connection reset".into(),
                detail: None,
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_uses_generic_message() {
        let err = GatewayError::Rejected {
            code: RpcCode::INTERNAL,
            detail: Some("stack trace".into()),
        };
        assert_eq!(err.to_string(), GENERIC_REJECTION);
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_error_body_envelope() {
        let err = GatewayError::NotFound {
            message: "account not found".into(),
            detail: Some("no account with id 42".into()),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], error_codes::NOT_FOUND);
        assert_eq!(body["msg"], "account not found");
        assert_eq!(body["detail"], "no account with id 42");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_transport_body_carries_detail() {
        let err = GatewayError::Transport {
            message: "bad gateway".into(),
            detail: Some("upstream finance pod crashed".into()),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], error_codes::INTERNAL_ERROR);
        assert_eq!(body["msg"], "bad gateway");
        assert_eq!(body["detail"], "upstream finance pod crashed");
    }
}
