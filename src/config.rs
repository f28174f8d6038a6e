use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::backend::BackendKind;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Emit request/response payload traces (target `ERPGW_WIRE`)
    #[serde(default)]
    pub log_payloads: bool,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Network locations of the backend RPC services.
///
/// A backend without a section stays uninitialized.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendsConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub finance: Option<BackendEndpoint>,
    #[serde(default)]
    pub crm: Option<BackendEndpoint>,
    #[serde(default)]
    pub supply_chain: Option<BackendEndpoint>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendEndpoint {
    pub endpoint: String,
    pub service: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            finance: None,
            crm: None,
            supply_chain: None,
        }
    }
}

impl BackendsConfig {
    pub fn endpoint(&self, kind: BackendKind) -> Option<&BackendEndpoint> {
        match kind {
            BackendKind::Finance => self.finance.as_ref(),
            BackendKind::Crm => self.crm.as_ref(),
            BackendKind::SupplyChain => self.supply_chain.as_ref(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", config_path))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
log_level: info
log_dir: ./logs
log_file: gateway.log
use_json: false
rotation: daily
gateway:
  host: 0.0.0.0
  port: 8080
backends:
  timeout_ms: 3000
  finance:
    endpoint: http://localhost:50051
    service: finance.FinanceService
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = AppConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert!(!config.log_payloads);
        assert_eq!(config.backends.timeout_ms, 3000);
        assert!(config.backends.endpoint(BackendKind::Finance).is_some());
        assert!(config.backends.endpoint(BackendKind::Crm).is_none());
    }

    #[test]
    fn test_backends_section_optional() {
        let yaml = SAMPLE.split("backends:").next().unwrap();
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.backends.timeout_ms, 10_000);
        assert!(config.backends.finance.is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load("does-not-exist").is_err());
    }

    #[test]
    fn test_shipped_configs_parse() {
        for env in ["dev", "prod"] {
            let config = AppConfig::load(env).unwrap();
            for kind in BackendKind::ALL {
                assert!(config.backends.endpoint(kind).is_some(), "{env}: {kind}");
            }
        }
    }
}
