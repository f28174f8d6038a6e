//! Backend Router
//!
//! Resolves the one backend client that owns a call and invokes it under a
//! bounded timeout. No retries here; retry policy belongs to the transport.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::{
    BackendError, BackendKind, CallDescriptor, CallMetadata, DispatchError, HttpRpcClient,
    RpcClient,
};
use crate::config::BackendsConfig;

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Target for payload-level traces (disabled unless `log_payloads` is set)
pub const WIRE_TARGET: &str = "ERPGW_WIRE";

/// Holds the backend client handles for the lifetime of the process.
///
/// A slot left empty means the backend was never initialized; calls routed
/// to it fail fast with [`DispatchError::Unavailable`].
#[derive(Clone)]
pub struct BackendRouter {
    finance: Option<Arc<dyn RpcClient>>,
    crm: Option<Arc<dyn RpcClient>>,
    supply_chain: Option<Arc<dyn RpcClient>>,
    timeout: Duration,
}

impl BackendRouter {
    pub fn builder() -> BackendRouterBuilder {
        BackendRouterBuilder::default()
    }

    /// Build HTTP clients for every configured backend.
    ///
    /// A backend that is not configured, or whose client cannot be built,
    /// is logged and left uninitialized. The gateway still starts.
    pub fn from_config(config: &BackendsConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms);
        let mut builder = Self::builder().timeout(timeout);

        for kind in BackendKind::ALL {
            let Some(endpoint) = config.endpoint(kind) else {
                tracing::warn!(backend = %kind, "backend not configured, calls will fail fast");
                continue;
            };
            match HttpRpcClient::new(kind, endpoint, timeout) {
                Ok(client) => {
                    tracing::info!(
                        backend = %kind,
                        endpoint = %endpoint.endpoint,
                        service = %endpoint.service,
                        "backend client initialized"
                    );
                    builder = builder.register(Arc::new(client));
                }
                Err(e) => {
                    tracing::error!(backend = %kind, error = %e, "backend client initialization failed");
                }
            }
        }

        builder.build()
    }

    pub fn client(&self, kind: BackendKind) -> Option<&Arc<dyn RpcClient>> {
        match kind {
            BackendKind::Finance => self.finance.as_ref(),
            BackendKind::Crm => self.crm.as_ref(),
            BackendKind::SupplyChain => self.supply_chain.as_ref(),
        }
    }

    pub fn is_available(&self, kind: BackendKind) -> bool {
        self.client(kind).is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Place exactly one backend call.
    pub async fn dispatch(
        &self,
        call: &CallDescriptor,
        auth_token: Option<&str>,
    ) -> Result<Value, DispatchError> {
        let client = self
            .client(call.backend)
            .ok_or(DispatchError::Unavailable(call.backend))?;

        let metadata = CallMetadata {
            auth_token: auth_token.map(str::to_string),
            correlation_id: call.correlation_id.clone(),
        };
        let payload = call.wire_payload();

        tracing::debug!(
            backend = %call.backend,
            method = %call.method,
            resource = call.resource,
            correlation_id = call.correlation_id.as_deref().unwrap_or("-"),
            "dispatching backend call"
        );
        tracing::trace!(target: WIRE_TARGET, method = %call.method, payload = %payload, "request");

        let result = tokio::time::timeout(
            self.timeout,
            client.call(&call.method, payload, &metadata),
        )
        .await
        .map_err(|_| {
            BackendError::transport(format!(
                "{} {} timed out after {}ms",
                call.backend,
                call.method,
                self.timeout.as_millis()
            ))
        })?;

        match &result {
            Ok(body) => {
                tracing::trace!(target: WIRE_TARGET, method = %call.method, body = %body, "response")
            }
            Err(e) => {
                tracing::trace!(target: WIRE_TARGET, method = %call.method, error = %e, "error")
            }
        }

        Ok(result?)
    }
}

/// Constructor injection for [`BackendRouter`].
#[derive(Default)]
pub struct BackendRouterBuilder {
    finance: Option<Arc<dyn RpcClient>>,
    crm: Option<Arc<dyn RpcClient>>,
    supply_chain: Option<Arc<dyn RpcClient>>,
    timeout: Option<Duration>,
}

impl BackendRouterBuilder {
    /// Place a client in the slot of the backend it reports.
    pub fn register(mut self, client: Arc<dyn RpcClient>) -> Self {
        match client.backend() {
            BackendKind::Finance => self.finance = Some(client),
            BackendKind::Crm => self.crm = Some(client),
            BackendKind::SupplyChain => self.supply_chain = Some(client),
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> BackendRouter {
        BackendRouter {
            finance: self.finance,
            crm: self.crm,
            supply_chain: self.supply_chain,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockRpcClient, PageCursor, RpcCode};
    use serde_json::{Map, json};

    fn call(backend: BackendKind, method: &str) -> CallDescriptor {
        CallDescriptor::new("Test", backend, method, Map::new())
    }

    #[tokio::test]
    async fn test_routes_to_owning_backend() {
        let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));
        let crm = Arc::new(MockRpcClient::new(BackendKind::Crm));
        let router = BackendRouter::builder()
            .register(finance.clone())
            .register(crm.clone())
            .build();

        router.dispatch(&call(BackendKind::Crm, "GetCrmAccounts"), None).await.unwrap();

        assert_eq!(crm.call_count(), 1);
        assert_eq!(finance.call_count(), 0);
    }

    #[tokio::test]
    async fn test_uninitialized_backend_fails_fast() {
        let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));
        let router = BackendRouter::builder().register(finance.clone()).build();

        let err = router
            .dispatch(&call(BackendKind::SupplyChain, "GetVendors"), None)
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::Unavailable(BackendKind::SupplyChain));
        assert_eq!(finance.call_count(), 0);
    }

    #[tokio::test]
    async fn test_metadata_and_cursor_forwarded() {
        let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));
        let router = BackendRouter::builder().register(finance.clone()).build();

        let descriptor = call(BackendKind::Finance, "GetInvoices")
            .with_cursor(PageCursor::new(Some(2), Some(10)))
            .with_correlation_id(Some("req-1".into()));
        router.dispatch(&descriptor, Some("tok")).await.unwrap();

        let recorded = &finance.calls()[0];
        assert_eq!(recorded.payload, json!({"page": 2, "pageSize": 10}));
        assert_eq!(recorded.metadata.auth_token.as_deref(), Some("tok"));
        assert_eq!(recorded.metadata.correlation_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn test_backend_error_passed_through() {
        let finance = Arc::new(
            MockRpcClient::new(BackendKind::Finance)
                .with_error("GetAccount", BackendError::with_code(RpcCode::NOT_FOUND, "missing")),
        );
        let router = BackendRouter::builder().register(finance).build();

        let err = router
            .dispatch(&call(BackendKind::Finance, "GetAccount"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Backend(BackendError { code: Some(RpcCode::NOT_FOUND), .. })
        ));
    }

    #[tokio::test]
    async fn test_call_that_never_resolves_times_out() {
        let slow = Arc::new(
            MockRpcClient::new(BackendKind::Finance).with_delay(Duration::from_secs(5)),
        );
        let router = BackendRouter::builder()
            .register(slow)
            .timeout(Duration::from_millis(20))
            .build();

        let err = router
            .dispatch(&call(BackendKind::Finance, "GetAccounts"), None)
            .await
            .unwrap_err();
        match err {
            DispatchError::Backend(e) => {
                assert!(e.code.is_none());
                assert!(e.message.contains("timed out"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_config_leaves_unconfigured_backends_empty() {
        let config = BackendsConfig {
            timeout_ms: 500,
            finance: Some(crate::config::BackendEndpoint {
                endpoint: "http://localhost:50051".into(),
                service: "finance.FinanceService".into(),
            }),
            crm: None,
            supply_chain: None,
        };
        let router = BackendRouter::from_config(&config);

        assert!(router.is_available(BackendKind::Finance));
        assert!(!router.is_available(BackendKind::Crm));
        assert!(!router.is_available(BackendKind::SupplyChain));
        assert_eq!(router.timeout(), Duration::from_millis(500));
    }
}
