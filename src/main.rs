//! ERP Gateway
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌──────────┐    ┌──────────────┐
//! │  REST    │───▶│ Normalizer │───▶│  Router  │───▶│ finance      │
//! │ (axum)   │    └────────────┘    │ (timeout)│───▶│ crm          │
//! │          │◀───── Shaper / Translator ◀─────│───▶│ supply_chain │
//! └──────────┘                      └──────────┘    └──────────────┘
//! ```
//!
//! Usage:
//!   erp_gateway [--env <name>] [--port <port>]

use std::sync::Arc;

use anyhow::Context;

use erp_gateway::backend::BackendRouter;
use erp_gateway::config::AppConfig;
use erp_gateway::gateway::{self, services::GatewayEngine, state::AppState};
use erp_gateway::resources::ResourceRegistry;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" {
            let raw = args.get(i + 1).context("--port requires a value")?;
            let port = raw
                .parse()
                .with_context(|| format!("invalid --port value: {}", raw))?;
            return Ok(Some(port));
        }
    }
    Ok(None)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override()? {
        app_config.gateway.port = port;
    }

    let _log_guard = erp_gateway::logging::init_logging(&app_config);
    tracing::info!(
        env = %env,
        version = %gateway::state::build_version(),
        "Starting ERP gateway"
    );

    let router = BackendRouter::from_config(&app_config.backends);
    let registry = ResourceRegistry::standard();
    tracing::info!(
        families = registry.len(),
        timeout_ms = router.timeout().as_millis() as u64,
        "resource registry loaded"
    );

    let state = Arc::new(AppState::new(GatewayEngine::new(registry, router)));
    gateway::run_server(&app_config.gateway, state).await
}
