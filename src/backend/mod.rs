//! Backend RPC services
//!
//! The gateway fronts three independent services. Each one is reached through
//! an [`RpcClient`] handle that is built once at startup and injected into the
//! [`BackendRouter`].
//!
//! - [`call`]: Backend Call Descriptor and pagination cursor
//! - [`client`]: `RpcClient` trait and call metadata
//! - [`error`]: backend status codes and dispatch errors
//! - [`http`]: JSON-over-HTTP transport
//! - [`mock`]: scripted, call-recording client for tests
//! - [`router`]: resolves the owning backend and bounds every call

pub mod call;
pub mod client;
pub mod error;
pub mod http;
pub mod mock;
pub mod router;

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

pub use call::{CallDescriptor, PageCursor};
pub use client::{CallMetadata, RpcClient};
pub use error::{BackendError, DispatchError, RpcCode};
pub use http::HttpRpcClient;
pub use mock::{MockRpcClient, RecordedCall};
pub use router::{BackendRouter, BackendRouterBuilder};

/// The backend service that owns a resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Finance,
    Crm,
    SupplyChain,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Finance,
        BackendKind::Crm,
        BackendKind::SupplyChain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Finance => "finance",
            BackendKind::Crm => "crm",
            BackendKind::SupplyChain => "supply_chain",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
