//! Error Translator
//!
//! Maps a failed backend call onto the gateway error envelope. The mapping
//! is total over codes: not-found, invalid-argument and already-exists keep
//! the backend message, every other code collapses into a generic 400.
//! Code-less failures pass through unchanged as 500.

use axum::http::StatusCode;

use crate::backend::{BackendError, DispatchError, RpcCode};

use super::error::GatewayError;

/// Where a failure happened, for the log line.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub resource: &'a str,
    pub operation: &'a str,
    pub resource_id: Option<&'a str>,
}

/// HTTP status for a backend failure. `None` is a code-less failure.
pub fn http_status_for(code: Option<RpcCode>) -> StatusCode {
    match code {
        Some(RpcCode::NOT_FOUND) => StatusCode::NOT_FOUND,
        Some(_) => StatusCode::BAD_REQUEST,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Translate and log a dispatch failure.
pub fn translate(ctx: ErrorContext<'_>, err: DispatchError) -> GatewayError {
    let translated = match err {
        DispatchError::Unavailable(kind) => GatewayError::BackendUnavailable(kind),
        DispatchError::Backend(err) => from_backend(err),
    };
    log_translated(ctx, &translated);
    translated
}

fn from_backend(err: BackendError) -> GatewayError {
    let BackendError {
        code,
        message,
        details,
    } = err;

    match code {
        Some(RpcCode::NOT_FOUND) => GatewayError::NotFound {
            message,
            detail: details,
        },
        Some(RpcCode::INVALID_ARGUMENT) => GatewayError::InvalidArgument {
            message,
            detail: details,
        },
        Some(RpcCode::ALREADY_EXISTS) => GatewayError::Conflict {
            message,
            detail: details,
        },
        Some(code) => {
            tracing::warn!(backend_code = %code, backend_message = %message, "unclassified backend rejection");
            GatewayError::Rejected {
                code,
                detail: details.or(Some(message)),
            }
        }
        None => GatewayError::Transport {
            message,
            detail: details,
        },
    }
}

fn log_translated(ctx: ErrorContext<'_>, err: &GatewayError) {
    let backend_code = match err {
        GatewayError::NotFound { .. } => Some(RpcCode::NOT_FOUND),
        GatewayError::InvalidArgument { .. } => Some(RpcCode::INVALID_ARGUMENT),
        GatewayError::Conflict { .. } => Some(RpcCode::ALREADY_EXISTS),
        GatewayError::Rejected { code, .. } => Some(*code),
        _ => None,
    };
    let detail = match err {
        GatewayError::Rejected { detail, .. } => detail.as_deref(),
        other => other.detail(),
    };
    let backend_code = backend_code.map(|c| c.to_string());

    if err.is_client_error() {
        tracing::warn!(
            resource = ctx.resource,
            operation = ctx.operation,
            resource_id = ctx.resource_id.unwrap_or("-"),
            backend_code = backend_code.as_deref().unwrap_or("-"),
            message = %err,
            detail = detail.unwrap_or("-"),
            status = err.status().as_u16(),
            "backend call rejected"
        );
    } else {
        tracing::error!(
            resource = ctx.resource,
            operation = ctx.operation,
            resource_id = ctx.resource_id.unwrap_or("-"),
            message = %err,
            detail = detail.unwrap_or("-"),
            status = err.status().as_u16(),
            "backend call failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;

    const CTX: ErrorContext<'static> = ErrorContext {
        resource: "ChartOfAccounts",
        operation: "get",
        resource_id: Some("42"),
    };

    #[test]
    fn test_mapping_is_total() {
        for code in RpcCode::DEFINED.into_iter().chain([RpcCode(99), RpcCode(-1)]) {
            let err = translate(CTX, BackendError::with_code(code, "boom").into());
            let expected = http_status_for(Some(code));
            assert_eq!(err.status(), expected, "code {}", code);
            assert!(err.status().is_client_error(), "code {} escaped to 5xx", code);
        }
    }

    #[test]
    fn test_not_found_surfaces_detail() {
        let err = translate(
            CTX,
            BackendError::with_code(RpcCode::NOT_FOUND, "account not found")
                .with_details("no account with id 42")
                .into(),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "account not found");
        assert_eq!(err.detail(), Some("no account with id 42"));
    }

    #[test]
    fn test_known_codes() {
        let err = translate(CTX, BackendError::with_code(RpcCode::INVALID_ARGUMENT, "bad date").into());
        assert!(matches!(err, GatewayError::InvalidArgument { .. }));
        assert_eq!(err.to_string(), "bad date");

        let err = translate(CTX, BackendError::with_code(RpcCode::ALREADY_EXISTS, "duplicate code").into());
        assert!(matches!(err, GatewayError::Conflict { .. }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_codes_are_generic() {
        let err = translate(CTX, BackendError::with_code(RpcCode::INTERNAL, "pq: relation missing").into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), crate::gateway::error::GENERIC_REJECTION);

        // a zero code delivered as an error is still a rejection
        let err = translate(CTX, BackendError::with_code(RpcCode::OK, "odd").into());
        assert!(matches!(err, GatewayError::Rejected { code: RpcCode::OK, .. }));
    }

    #[test]
    fn test_codeless_error_propagates_unchanged() {
        let err = translate(CTX, BackendError::transport("connection refused").into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_codeless_error_keeps_detail() {
        let backend = crate::backend::http::error_from_body(
            502,
            &serde_json::json!({"message": "bad gateway", "details": "upstream finance pod crashed"}),
        );
        let err = translate(CTX, backend.into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "bad gateway");
        assert_eq!(err.detail(), Some("upstream finance pod crashed"));
    }

    #[test]
    fn test_unavailable() {
        let err = translate(CTX, DispatchError::Unavailable(BackendKind::SupplyChain));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
