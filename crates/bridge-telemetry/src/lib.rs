//! # Bridge Telemetry
//!
//! Logging setup shared by the notification bridge binaries and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NB_SERVICE_NAME` | `notification-bridge` | Service name in log lines |
//! | `NB_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `NB_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `NB_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter directive: {0}")]
    Filter(String),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}
