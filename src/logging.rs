use crate::backend::router::WIRE_TARGET;
use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive built from config; payload traces stay off unless requested.
pub fn filter_directive(config: &AppConfig) -> String {
    if config.log_payloads {
        format!("{},{}=trace", config.log_level, WIRE_TARGET)
    } else {
        format!("{},{}=off", config.log_level, WIRE_TARGET)
    }
}

pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true) // Keep target in JSON for structured queries
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_payloads: bool) -> AppConfig {
        let mut config = AppConfig::from_yaml(
            "log_level: debug\nlog_dir: ./logs\nlog_file: gw.log\nuse_json: false\nrotation: never\ngateway:\n  host: 127.0.0.1\n  port: 8080\n",
        )
        .unwrap();
        config.log_payloads = log_payloads;
        config
    }

    #[test]
    fn test_payload_traces_off_by_default() {
        assert_eq!(filter_directive(&config(false)), "debug,ERPGW_WIRE=off");
        assert_eq!(filter_directive(&config(true)), "debug,ERPGW_WIRE=trace");
    }
}
