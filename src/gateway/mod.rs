//! HTTP gateway
//!
//! axum router over the generic resource engine. All routes live under
//! `/api/v1`; Swagger UI is served at `/docs`.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod translate;
pub mod types;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use handlers::RequestId;
use state::AppState;

pub use error::GatewayError;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Attach a correlation token to every request and echo it on the response.
///
/// A well-formed inbound `X-Request-Id` is reused; otherwise a UUID v4 is
/// generated.
async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    tracing::debug!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        request_id = %request_id,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Build the complete router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/resources", get(handlers::list_catalog))
        .route(
            "/{resource}",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/{resource}/{id}",
            get(handlers::get_resource)
                .put(handlers::update_resource)
                .patch(handlers::update_resource)
                .delete(handlers::delete_resource),
        )
        .route("/{resource}/{id}/{action}", post(handlers::run_action));

    Router::new()
        .nest("/api/v1", api)
        .layer(from_fn(request_id_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {} (port already in use?)", addr, e))?;

    tracing::info!("🚀 Gateway listening on http://{}", addr);
    tracing::info!("📖 API Docs: http://{}/docs", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
