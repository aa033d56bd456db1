//! Service-level error type.
//!
//! Covers the failures that can occur during startup: bad configuration,
//! telemetry initialization, and listener binding. Handler-level failures
//! use [`crate::http::response::ApiError`] instead, which maps to an HTTP
//! response rather than terminating the process.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::observability::telemetry::TelemetryError;

/// Top-level error for the demo service binary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
