//! JSON-over-HTTP transport for backend RPC calls.
//!
//! Each call is `POST {endpoint}/{service}/{Method}` with the camelCase
//! payload as body. Non-2xx responses carry `{code, message, details}`.
//! A response that cannot be decoded, or an error body without a code,
//! is reported as a transport failure (no code).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{BackendError, BackendKind, CallMetadata, RpcClient, RpcCode};
use crate::config::BackendEndpoint;

/// Correlation header sent to the backends
pub const CORRELATION_HEADER: &str = "x-correlation-id";

pub struct HttpRpcClient {
    backend: BackendKind,
    http: reqwest::Client,
    base_url: String,
    service: String,
}

impl HttpRpcClient {
    /// Build a client for one backend endpoint.
    ///
    /// `timeout` is applied by reqwest as well, so a hung connection is
    /// released even if the caller's own deadline is longer.
    pub fn new(
        backend: BackendKind,
        endpoint: &BackendEndpoint,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let base_url = endpoint.endpoint.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::transport(format!(
                "{} endpoint is empty",
                backend
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            backend,
            http,
            base_url,
            service: endpoint.service.clone(),
        })
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.service, method)
    }
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn call(
        &self,
        method: &str,
        payload: Value,
        metadata: &CallMetadata,
    ) -> Result<Value, BackendError> {
        let mut request = self.http.post(self.method_url(method)).json(&payload);
        if let Some(token) = &metadata.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(correlation_id) = &metadata.correlation_id {
            request = request.header(CORRELATION_HEADER, correlation_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::transport(format!("{} {}: {}", self.backend, method, e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::transport(format!("{} {}: {}", self.backend, method, e)))?;

        let body = if bytes.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                BackendError::transport(format!(
                    "{} {}: undecodable response body: {}",
                    self.backend, method, e
                ))
            })?
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_body(status.as_u16(), &body))
        }
    }
}

/// Decode a backend error body.
///
/// Without a numeric `code` the failure is treated as transport-level.
pub fn error_from_body(http_status: u16, body: &Value) -> BackendError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("backend returned HTTP {}", http_status));

    let details = body
        .get("details")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let code = body
        .get("code")
        .and_then(Value::as_i64)
        .and_then(|c| i32::try_from(c).ok());

    let error = match code {
        Some(code) => BackendError::with_code(RpcCode(code), message),
        None => BackendError::transport(message),
    };
    match details {
        Some(details) => error.with_details(details),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint(url: &str) -> BackendEndpoint {
        BackendEndpoint {
            endpoint: url.to_string(),
            service: "finance.FinanceService".to_string(),
        }
    }

    #[test]
    fn test_method_url() {
        let client = HttpRpcClient::new(
            BackendKind::Finance,
            &endpoint("http://finance:50051/"),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.method_url("GetAccount"),
            "http://finance:50051/finance.FinanceService/GetAccount"
        );
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let result = HttpRpcClient::new(BackendKind::Crm, &endpoint(""), Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_error_body_with_code() {
        let err = error_from_body(
            404,
            &json!({"code": 5, "message": "not found", "details": "account 42 does not exist"}),
        );
        assert_eq!(err.code, Some(RpcCode::NOT_FOUND));
        assert_eq!(err.message, "not found");
        assert_eq!(err.details.as_deref(), Some("account 42 does not exist"));
    }

    #[test]
    fn test_error_body_without_code_is_transport() {
        let err = error_from_body(502, &json!({}));
        assert!(err.code.is_none());
        assert_eq!(err.message, "backend returned HTTP 502");
    }
}
