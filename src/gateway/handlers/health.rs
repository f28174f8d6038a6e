//! Health check handler

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::backend::BackendKind;

use super::super::state::AppState;
use super::helpers::{ApiResult, now_ms, ok};

/// Initialization state of one backend client
#[derive(Debug, Serialize, ToSchema)]
pub struct BackendHealth {
    pub backend: BackendKind,
    /// Client built at startup; calls to an uninitialized backend fail fast
    pub initialized: bool,
}

/// Health check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every backend is initialized, `degraded` otherwise
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "0.1.0+3f2b9c1")]
    pub version: String,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    pub backends: Vec<BackendHealth>,
}

/// Health check endpoint
///
/// Reports which backend clients were initialized. Backends are not
/// pinged: the gateway holds no state worth probing.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Gateway is up", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let router = state.engine.router();
    let backends: Vec<BackendHealth> = BackendKind::ALL
        .into_iter()
        .map(|backend| BackendHealth {
            backend,
            initialized: router.is_available(backend),
        })
        .collect();

    let status = if backends.iter().all(|b| b.initialized) {
        "ok"
    } else {
        "degraded"
    };

    ok(HealthResponse {
        status,
        version: state.version.clone(),
        timestamp_ms: now_ms(),
        backends,
    })
}
