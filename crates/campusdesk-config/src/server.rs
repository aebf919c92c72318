use std::env;

/// Listener and observability toggles for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to bind (`SERVER_ADDR`, default `0.0.0.0:3000`)
    pub addr: String,
    /// Directory for rotated JSON logs (`LOG_DIR`); console only when unset
    pub log_dir: Option<String>,
    /// Console log level when `RUST_LOG` is unset (`LOG_LEVEL`, default `info`)
    pub log_level: String,
    /// Whether the Prometheus recorder is installed (`METRICS_ENABLED`, default on)
    pub metrics_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_dir: env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            metrics_enabled: env::var("METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
