//! Gateway Engine - the one generic resource handler
//!
//! Every REST operation on every resource family runs through
//! [`GatewayEngine::execute`], driven by the family's
//! [`ResourceDescriptor`]:
//!
//! 1. resolve the family and check it offers the operation
//! 2. validate the path id
//! 3. normalize input into a [`CallDescriptor`] (no I/O)
//! 4. fill dependent defaults (create only)
//! 5. dispatch exactly one primary backend call
//! 6. shape the response, or translate the failure

use serde_json::{Map, Value, json};

use crate::backend::{BackendRouter, CallDescriptor, PageCursor};
use crate::normalize::{self, NormalizeError, NormalizeMode, coerce};
use crate::resources::{DependentDefault, Operation, ResourceDescriptor, ResourceRegistry};
use crate::shape::{self, ResourceResponse};

use crate::gateway::error::GatewayError;
use crate::gateway::translate::{ErrorContext, translate};
use crate::gateway::validation::ResourceId;

/// Query keys consumed by pagination rather than passed as filters.
const PAGE_KEYS: [&str; 1] = ["page"];
const PAGE_SIZE_KEYS: [&str; 2] = ["page_size", "pageSize"];

/// One inbound REST call, before normalization.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Route segment naming the family
    pub resource: String,
    pub operation: Operation,
    /// Raw `{id}` path segment
    pub id: Option<String>,
    /// JSON body, or the query string as an object of strings for lists
    pub input: Value,
    pub auth_token: Option<String>,
    pub correlation_id: Option<String>,
}

impl ResourceRequest {
    pub fn new(resource: impl Into<String>, operation: Operation) -> Self {
        Self {
            resource: resource.into(),
            operation,
            id: None,
            input: Value::Null,
            auth_token: None,
            correlation_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = input;
        self
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

/// Registry plus router: all the state a request needs.
pub struct GatewayEngine {
    registry: ResourceRegistry,
    router: BackendRouter,
}

impl GatewayEngine {
    pub fn new(registry: ResourceRegistry, router: BackendRouter) -> Self {
        Self { registry, router }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn router(&self) -> &BackendRouter {
        &self.router
    }

    /// Resolve the family and check it offers the operation.
    pub fn resolve(&self, req: &ResourceRequest) -> Result<&ResourceDescriptor, GatewayError> {
        let descriptor = self
            .registry
            .get(&req.resource)
            .ok_or_else(|| GatewayError::UnknownResource(req.resource.clone()))?;

        if !descriptor.supports(&req.operation) {
            return Err(GatewayError::UnsupportedOperation {
                resource: descriptor.family.to_string(),
                operation: req.operation.to_string(),
            });
        }
        Ok(descriptor)
    }

    /// Normalize a request into the call it would dispatch. Pure.
    pub fn build_call(&self, req: &ResourceRequest) -> Result<CallDescriptor, GatewayError> {
        let descriptor = self.resolve(req)?;
        build_call(descriptor, req)
    }

    /// Run one REST operation end to end.
    pub async fn execute(&self, req: ResourceRequest) -> Result<ResourceResponse, GatewayError> {
        let descriptor = self.resolve(&req)?;
        let mut call = build_call(descriptor, &req)?;

        let auth_token = if descriptor.forward_auth {
            req.auth_token.as_deref()
        } else {
            None
        };

        if req.operation == Operation::Create {
            for lookup in &descriptor.dependent_defaults {
                self.fill_dependent_default(descriptor, lookup, &mut call, auth_token)
                    .await;
            }
        }

        let ctx = ErrorContext {
            resource: descriptor.family,
            operation: req.operation.label(),
            resource_id: req.id.as_deref(),
        };

        let raw = self
            .router
            .dispatch(&call, auth_token)
            .await
            .map_err(|e| translate(ctx, e))?;

        tracing::info!(
            resource = descriptor.family,
            operation = %req.operation,
            method = %call.method,
            resource_id = req.id.as_deref().unwrap_or("-"),
            correlation_id = call.correlation_id.as_deref().unwrap_or("-"),
            "backend call completed"
        );

        Ok(shape_response(descriptor, &req, &call, &raw))
    }

    /// Sequential lookup before the primary call. Never fails the request:
    /// any error leaves the field `null`.
    async fn fill_dependent_default(
        &self,
        descriptor: &ResourceDescriptor,
        lookup: &DependentDefault,
        call: &mut CallDescriptor,
        auth_token: Option<&str>,
    ) {
        let rpc_field = lookup.rpc_field();
        if call.payload.get(&rpc_field).is_some_and(|v| !v.is_null()) {
            return;
        }

        let lookup_call = CallDescriptor::new(descriptor.family, lookup.backend, lookup.method, Map::new())
            .with_correlation_id(call.correlation_id.clone());

        let value = match self.router.dispatch(&lookup_call, auth_token).await {
            Ok(raw) => {
                let entity = shape::unwrap_entity(&raw, &lookup.entity_keys);
                let id = lookup
                    .id_keys
                    .iter()
                    .find_map(|key| entity.get(*key))
                    .and_then(|v| match v {
                        Value::String(s) if !s.is_empty() => Some(Value::String(s.clone())),
                        Value::Number(n) => Some(Value::String(n.to_string())),
                        _ => None,
                    });
                if id.is_none() {
                    tracing::warn!(
                        resource = descriptor.family,
                        field = lookup.field,
                        method = lookup.method,
                        "default lookup returned no id, sending null"
                    );
                }
                id.unwrap_or(Value::Null)
            }
            Err(e) => {
                tracing::warn!(
                    resource = descriptor.family,
                    field = lookup.field,
                    method = lookup.method,
                    error = %e,
                    "default lookup failed, sending null"
                );
                Value::Null
            }
        };

        call.payload.insert(rpc_field, value);
    }
}

/// Normalize a request against its descriptor. Pure: no backend calls.
pub fn build_call(
    descriptor: &ResourceDescriptor,
    req: &ResourceRequest,
) -> Result<CallDescriptor, GatewayError> {
    let id = if req.operation.needs_id() {
        Some(ResourceId::new(req.id.as_deref().unwrap_or(""))?)
    } else {
        None
    };

    let required = descriptor.required_for(&req.operation);
    let method = descriptor.method_name(&req.operation);

    let (payload, cursor) = match &req.operation {
        Operation::List => {
            let mut query = match &req.input {
                Value::Object(map) => map.clone(),
                Value::Null => Map::new(),
                _ => return Err(NormalizeError::NotAnObject.into()),
            };
            let cursor = take_cursor(&mut query)?;
            let filters = normalize::normalize(
                &Value::Object(query),
                &descriptor.filters,
                required,
                NormalizeMode::Filter,
            )?;
            (filters, Some(cursor))
        }
        Operation::Get | Operation::Delete => (Map::new(), None),
        Operation::Create => (
            normalize::normalize(&req.input, &descriptor.input, required, NormalizeMode::Create)?,
            None,
        ),
        Operation::Update => (
            normalize::normalize(&req.input, &descriptor.input, required, NormalizeMode::Update)?,
            None,
        ),
        Operation::Action(name) => {
            let payload = match descriptor.action_spec(name) {
                Some(action) => normalize::normalize(
                    &req.input,
                    &action.input,
                    &action.required,
                    NormalizeMode::Update,
                )?,
                None => Map::new(),
            };
            (payload, None)
        }
    };

    let mut payload = payload;
    if let Some(id) = id {
        payload.insert("id".to_string(), Value::String(id.into_string()));
    }

    let mut call = CallDescriptor::new(descriptor.family, descriptor.backend, method, payload)
        .with_correlation_id(req.correlation_id.clone());
    if let Some(cursor) = cursor {
        call = call.with_cursor(cursor);
    }
    Ok(call)
}

/// Pull `page` and `page_size`/`pageSize` out of a list query.
fn take_cursor(query: &mut Map<String, Value>) -> Result<PageCursor, GatewayError> {
    let page = take_u32(query, &PAGE_KEYS)?;
    let page_size = take_u32(query, &PAGE_SIZE_KEYS)?;
    Ok(PageCursor::new(page, page_size))
}

fn take_u32(query: &mut Map<String, Value>, keys: &[&str]) -> Result<Option<u32>, GatewayError> {
    let mut found = None;
    for key in keys {
        if let Some(value) = query.remove(*key) {
            if found.is_none() && !coerce::is_blank(&value) {
                found = Some((*key, value));
            }
        }
    }
    match found {
        Some((key, value)) => {
            let n = coerce::integer(key, &value)?;
            Ok(Some(n.clamp(0, i64::from(u32::MAX)) as u32))
        }
        None => Ok(None),
    }
}

fn shape_response(
    descriptor: &ResourceDescriptor,
    req: &ResourceRequest,
    call: &CallDescriptor,
    raw: &Value,
) -> ResourceResponse {
    match &req.operation {
        Operation::List => shape::shape_page(
            raw,
            &descriptor.list_key_refs(),
            &descriptor.output,
            call.cursor.unwrap_or_default(),
        ),
        Operation::Delete => {
            let deleted = raw.get("success").and_then(Value::as_bool).unwrap_or(true);
            json!({
                "id": req.id,
                "deleted": deleted,
            })
        }
        _ => {
            let entity = shape::unwrap_entity(raw, &descriptor.entity_key_refs());
            shape::shape_object(entity, &descriptor.output)
        }
    }
}
