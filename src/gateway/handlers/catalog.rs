//! Resource catalog handler

use std::sync::Arc;

use axum::extract::State;

use crate::resources::ResourceSummary;

use super::super::state::AppState;
use super::helpers::{ApiResult, ok};

/// List resource families, their owning backend and operations
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    responses(
        (status = 200, description = "Resource catalog", body = Vec<ResourceSummary>, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn list_catalog(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ResourceSummary>> {
    ok(state.engine.registry().summaries())
}
