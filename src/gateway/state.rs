use super::services::GatewayEngine;

/// Gateway application state (shared across requests behind an `Arc`)
pub struct AppState {
    /// Resource registry and backend router
    pub engine: GatewayEngine,
    /// Build version reported by the health check
    pub version: String,
}

impl AppState {
    pub fn new(engine: GatewayEngine) -> Self {
        Self {
            engine,
            version: build_version(),
        }
    }
}

/// `CARGO_PKG_VERSION` plus the git hash captured by the build script.
pub fn build_version() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) => format!("{}+{}", env!("CARGO_PKG_VERSION"), hash),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}
