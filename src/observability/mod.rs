//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → propagation.rs (extract W3C Trace Context)
//!     → span.rs (status discipline for traced operations)
//!     → telemetry.rs (tracer provider, subscriber, OTLP export)
//!
//! All subsystems also produce:
//!     → structured log events (tracing + fmt layer)
//!     → metrics.rs (counters, histograms, Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Trace context is carried by the instrumented future, never by a
//!   process-global mutable variable, so concurrent requests cannot
//!   observe each other's context
//! - Propagation format is pluggable through the global text-map
//!   propagator; W3C Trace Context is registered by default
//! - Span export is optional; the demo works without a collector

pub mod metrics;
pub mod propagation;
pub mod span;
pub mod telemetry;
