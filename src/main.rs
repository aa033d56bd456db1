//! OpenTelemetry-instrumented demo web service.
//!
//! A small Axum application that shows how to attach custom spans to route
//! handlers and how to propagate W3C Trace Context across the inbound
//! request boundary.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 DEMO SERVICE                  │
//!                       │                                               │
//!    Client Request     │  ┌───────────┐    ┌────────────────────────┐ │
//!    ───────────────────┼─▶│  inbound  │───▶│     route handlers     │ │
//!    (traceparent hdr)  │  │ context   │    │  /demo/api/names       │ │
//!                       │  │propagator │    │  /demo/api/instrumented│ │
//!                       │  └───────────┘    └───────────┬────────────┘ │
//!                       │        │                      │              │
//!                       │        ▼                      ▼              │
//!                       │  ┌───────────┐    ┌────────────────────────┐ │
//!                       │  │  server   │    │  child spans           │ │
//!                       │  │  span     │◀───│  (database.query, ...) │ │
//!                       │  └───────────┘    └────────────────────────┘ │
//!                       │                                               │
//!                       │  ┌─────────────────────────────────────────┐ │
//!                       │  │          Cross-Cutting Concerns          │ │
//!                       │  │  ┌────────┐ ┌───────────┐ ┌───────────┐ │ │
//!                       │  │  │ config │ │ telemetry │ │  metrics  │ │ │
//!                       │  │  └────────┘ └───────────┘ └───────────┘ │ │
//!                       │  └─────────────────────────────────────────┘ │
//!                       └──────────────────────────────────────────────┘
//!                                          │
//!                                          ▼
//!                                   OTLP collector
//! ```

use std::path::Path;

use tokio::net::TcpListener;

use otel_demo::config::loader::load_config;
use otel_demo::config::ServiceConfig;
use otel_demo::error::ServiceError;
use otel_demo::http::HttpServer;
use otel_demo::observability::telemetry;

/// Environment variable pointing at an optional TOML config file.
const CONFIG_ENV: &str = "DEMO_CONFIG";

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // Load configuration (defaults when no file is given)
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => load_config(Path::new(&path))?,
        Err(_) => ServiceConfig::default(),
    };

    // Initialize telemetry (propagator, tracer provider, subscriber)
    let telemetry = telemetry::init_telemetry(&config.telemetry)?;

    tracing::info!(
        service_name = %config.telemetry.service_name,
        bind_address = %config.listener.bind_address,
        otlp_endpoint = %config.telemetry.otlp_endpoint,
        tracing_enabled = config.telemetry.enabled,
        "Configuration loaded"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            otel_demo::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    // Flush any buffered spans before exiting
    telemetry.shutdown();

    tracing::info!("Shutdown complete");
    Ok(())
}
