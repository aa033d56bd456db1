//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the demo routes
//! - Wire up middleware (timeout, request ID, tracing, context propagation)
//! - Bind the server to a listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - The trace-context propagator is the outermost layer so every other
//!   layer and handler runs inside the server span
//! - The router is cheap to clone, so tests drive it directly through
//!   `tower::ServiceExt::oneshot` without a listener

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::middleware::propagate_inbound_context;

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig) -> Router {
        Router::new()
            .route("/demo/api/names", get(handlers::get_names))
            .route("/demo/api/instrumented", get(handlers::get_instrumented))
            .route("/health", get(handlers::health))
            // Layers are listed innermost first; the trace-context
            // propagator added last is outermost and runs first, so every
            // other layer and handler sees the server span.
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(axum::middleware::from_fn(propagate_inbound_context))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
