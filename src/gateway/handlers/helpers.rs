//! Handler helper functions
//!
//! Header extraction and success envelopes shared by the handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header};
use serde_json::Value;

use super::super::error::GatewayError;
use super::super::types::ApiResponse;

/// Handler result: success envelope or gateway error.
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), GatewayError>;

/// Correlation token attached by the request-id middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// 200 OK envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 Created envelope
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

/// Token from `Authorization: Bearer <token>`. Other schemes are ignored.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// JSON request body. An empty body is `null` (treated as `{}` downstream).
pub fn parse_body(body: &Bytes) -> Result<Value, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidBody(e.to_string()))
}

/// Get current time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(bearer_token(&headers).as_deref(), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(&Bytes::new()).unwrap(), Value::Null);
        assert_eq!(parse_body(&Bytes::from_static(b"  \n")).unwrap(), Value::Null);
        assert_eq!(
            parse_body(&Bytes::from_static(br#"{"a":1}"#)).unwrap(),
            serde_json::json!({"a": 1})
        );
        assert!(matches!(
            parse_body(&Bytes::from_static(b"{not json")),
            Err(GatewayError::InvalidBody(_))
        ));
    }
}
