//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Chain the process is acting for (empty when not bound to one chain)
    pub chain_label: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "cross-dao".to_string(),
            chain_label: String::new(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DAO_SERVICE_NAME`: Service name (default: cross-dao)
    /// - `DAO_CHAIN_LABEL`: Chain label (default: empty)
    /// - `DAO_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `DAO_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `DAO_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("DAO_SERVICE_NAME").unwrap_or_else(|_| "cross-dao".to_string()),

            chain_label: env::var("DAO_CHAIN_LABEL").unwrap_or_default(),

            log_level: env::var("DAO_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("DAO_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),

            json_logs: env::var("DAO_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),
        }
    }

    /// Create configuration for a deployment on a specific chain.
    pub fn for_chain(chain_label: &str) -> Self {
        let mut config = Self::from_env();
        config.chain_label = chain_label.to_string();
        config
    }

    /// Get the full service name including the chain label.
    pub fn full_service_name(&self) -> String {
        if self.chain_label.is_empty() {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.chain_label)
        }
    }
}

/// Lenient boolean parsing: `1/true/yes/on` and `0/false/no/off`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
