//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name, logged once at startup and used by the host as its
    /// application id
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive such as `notification_bridge=debug`)
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "notification-bridge".to_string(),
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
    /// - `NB_SERVICE_NAME`: Service name (default: notification-bridge)
    /// - `NB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `NB_CONSOLE_OUTPUT`: Console output, off only for `false` or `0` (default: true)
    /// - `NB_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("NB_SERVICE_NAME")
                .unwrap_or_else(|_| "notification-bridge".to_string()),

            log_level: env::var("NB_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("NB_CONSOLE_OUTPUT")
                .map(|v| !is_off(&v))
                .unwrap_or(true),

            json_logs: env::var("NB_JSON_LOGS")
                .map(|v| is_on(&v))
                .unwrap_or(is_container),
        }
    }
}

/// Opt-in flag: only `true` or `1` enable it.
fn is_on(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "true" || value == "1"
}

/// Opt-out flag: only `false` or `0` disable it.
fn is_off(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "false" || value == "0"
}
