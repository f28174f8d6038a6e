use async_trait::async_trait;
use serde_json::Value;

use super::{BackendError, BackendKind};

/// Per-call metadata forwarded to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    /// Bearer token from the inbound request, if the resource forwards it
    pub auth_token: Option<String>,
    pub correlation_id: Option<String>,
}

/// A long-lived handle to one backend service.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Which backend this client talks to.
    fn backend(&self) -> BackendKind;

    /// Invoke `method` with a camelCase payload.
    async fn call(
        &self,
        method: &str,
        payload: Value,
        metadata: &CallMetadata,
    ) -> Result<Value, BackendError>;
}
