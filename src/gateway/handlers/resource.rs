//! Generic resource handlers
//!
//! One handler per HTTP shape; the resource family comes from the path and
//! everything else is driven by its descriptor.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Extension;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::resources::Operation;

use super::super::services::ResourceRequest;
use super::super::state::AppState;
use super::helpers::{ApiResult, RequestId, bearer_token, created, ok, parse_body};

fn request(
    resource: String,
    operation: Operation,
    headers: &HeaderMap,
    request_id: &RequestId,
) -> ResourceRequest {
    ResourceRequest::new(resource, operation)
        .with_auth_token(bearer_token(headers))
        .with_correlation_id(Some(request_id.0.clone()))
}

/// List entities of a resource family
///
/// Query parameters are the family's filters plus `page` and
/// `page_size` (or `pageSize`).
#[utoipa::path(
    get,
    path = "/api/v1/{resource}",
    params(
        ("resource" = String, Path, description = "Resource family, e.g. ChartOfAccounts"),
        ("page" = Option<u32>, Query, description = "Page number, default 1"),
        ("page_size" = Option<u32>, Query, description = "Page size, default 50, max 500")
    ),
    responses(
        (status = 200, description = "`{items, total, page, page_size}`"),
        (status = 400, description = "Malformed filter or page value"),
        (status = 404, description = "Unknown resource"),
        (status = 503, description = "Owning backend not initialized")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    let query: Map<String, Value> = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    let req = request(resource, Operation::List, &headers, &request_id)
        .with_input(Value::Object(query));
    ok(state.engine.execute(req).await?)
}

/// Create an entity
#[utoipa::path(
    post,
    path = "/api/v1/{resource}",
    params(("resource" = String, Path, description = "Resource family")),
    request_body(content = String, description = "Entity fields, snake_case or camelCase", content_type = "application/json"),
    responses(
        (status = 201, description = "Created entity"),
        (status = 400, description = "Missing or malformed field, or backend rejection"),
        (status = 404, description = "Unknown resource"),
        (status = 405, description = "Create not offered by this resource")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Value> {
    let input = parse_body(&body)?;
    let req = request(resource, Operation::Create, &headers, &request_id).with_input(input);
    created(state.engine.execute(req).await?)
}

/// Get one entity
#[utoipa::path(
    get,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource family"),
        ("id" = String, Path, description = "Entity id, 1-64 of [A-Za-z0-9_-]")
    ),
    responses(
        (status = 200, description = "Entity"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Unknown resource or entity")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    let req = request(resource, Operation::Get, &headers, &request_id).with_id(id);
    ok(state.engine.execute(req).await?)
}

/// Update an entity (partial: absent fields are left untouched)
#[utoipa::path(
    put,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource family"),
        ("id" = String, Path, description = "Entity id")
    ),
    request_body(content = String, description = "Fields to change", content_type = "application/json"),
    responses(
        (status = 200, description = "Updated entity"),
        (status = 400, description = "Malformed id or field"),
        (status = 404, description = "Unknown resource or entity")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Value> {
    let input = parse_body(&body)?;
    let req = request(resource, Operation::Update, &headers, &request_id)
        .with_id(id)
        .with_input(input);
    ok(state.engine.execute(req).await?)
}

/// Delete an entity
#[utoipa::path(
    delete,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource family"),
        ("id" = String, Path, description = "Entity id")
    ),
    responses(
        (status = 200, description = "`{id, deleted}`"),
        (status = 404, description = "Unknown resource or entity")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    let req = request(resource, Operation::Delete, &headers, &request_id).with_id(id);
    ok(state.engine.execute(req).await?)
}

/// Run a custom action (post, void, approve, ...)
#[utoipa::path(
    post,
    path = "/api/v1/{resource}/{id}/{action}",
    params(
        ("resource" = String, Path, description = "Resource family"),
        ("id" = String, Path, description = "Entity id"),
        ("action" = String, Path, description = "Action name, e.g. post or approve")
    ),
    request_body(content = String, description = "Action arguments", content_type = "application/json"),
    responses(
        (status = 200, description = "Entity after the action"),
        (status = 400, description = "Missing or malformed argument"),
        (status = 405, description = "Action not offered by this resource")
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
pub async fn run_action(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((resource, id, action)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Value> {
    let input = parse_body(&body)?;
    let req = request(resource, Operation::Action(action.to_ascii_lowercase()), &headers, &request_id)
        .with_id(id)
        .with_input(input);
    ok(state.engine.execute(req).await?)
}
