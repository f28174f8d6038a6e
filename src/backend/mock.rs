//! Mock backend client
//!
//! Scripted responses per RPC method plus a record of every call made.
//! Used by unit and integration tests as a router-call spy.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{BackendError, BackendKind, CallMetadata, RpcClient};

/// One call observed by [`MockRpcClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub payload: Value,
    pub metadata: CallMetadata,
}

pub struct MockRpcClient {
    backend: BackendKind,
    responses: Mutex<HashMap<String, Result<Value, BackendError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl MockRpcClient {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Script a successful response for `method`.
    pub fn with_response(self, method: &str, response: Value) -> Self {
        lock(&self.responses).insert(method.to_string(), Ok(response));
        self
    }

    /// Script a failure for `method`.
    pub fn with_error(self, method: &str, error: BackendError) -> Self {
        lock(&self.responses).insert(method.to_string(), Err(error));
        self
    }

    /// Delay every response (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_to(&self, method: &str) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RpcClient for MockRpcClient {
    fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn call(
        &self,
        method: &str,
        payload: Value,
        metadata: &CallMetadata,
    ) -> Result<Value, BackendError> {
        lock(&self.calls).push(RecordedCall {
            method: method.to_string(),
            payload,
            metadata: metadata.clone(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        lock(&self.responses)
            .get(method)
            .cloned()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RpcCode;

    #[tokio::test]
    async fn test_scripted_responses_and_recording() {
        let mock = MockRpcClient::new(BackendKind::Finance)
            .with_response("GetAccount", json!({"id": "1"}))
            .with_error("DeleteAccount", BackendError::with_code(RpcCode::NOT_FOUND, "gone"));

        let meta = CallMetadata::default();
        assert_eq!(
            mock.call("GetAccount", json!({"id": "1"}), &meta).await.unwrap(),
            json!({"id": "1"})
        );
        assert!(mock.call("DeleteAccount", json!({}), &meta).await.is_err());
        assert_eq!(mock.call("Unscripted", json!({}), &meta).await.unwrap(), json!({}));

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls_to("GetAccount").len(), 1);
        assert_eq!(mock.calls()[0].payload, json!({"id": "1"}));
    }
}
