//! # DAO Telemetry
//!
//! Logging setup shared by every Cross-DAO process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dao_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::for_chain("home-1"))?;
//! // tracing::info! etc. are now collected
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DAO_SERVICE_NAME` | `cross-dao` | Service name in logs |
//! | `DAO_LOG_LEVEL` | `info` | Log level filter |
//! | `DAO_JSON_LOGS` | `false` | JSON output |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, StructuredLogger};

use thiserror::Error;

#[doc(hidden)]
pub use tracing;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),

    /// Configuration could not be turned into a filter.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logger = init_logging(&config)?;
    Ok(TelemetryGuard { logger })
}

/// Install logging for tests, ignoring a subscriber installed by another test.
pub fn init_test_logging() {
    let config = TelemetryConfig {
        service_name: "cross-dao-test".to_string(),
        log_level: "debug".to_string(),
        ..Default::default()
    };
    let _ = init_logging(&config);
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    logger: StructuredLogger,
}

impl TelemetryGuard {
    /// The logger held by this guard.
    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.logger.service(), "Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with chain context.
///
/// ```rust,ignore
/// let _span = chain_span!("claim", chain_id = 10, tag = "Mint").entered();
/// ```
#[macro_export]
macro_rules! chain_span {
    ($name:expr, $($field:tt)*) => {
        $crate::tracing::info_span!($name, $($field)*)
    };
}
