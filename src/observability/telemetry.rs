//! Telemetry wiring: tracer provider, propagator, and subscriber.
//!
//! # Responsibilities
//! - Register the global W3C Trace Context propagator
//! - Build the OTLP span exporter and batch tracer provider
//! - Install the `tracing` subscriber stack (filter, fmt, OpenTelemetry)
//!
//! # Design Decisions
//! - Spans are created through the `tracing` macros and bridged to the
//!   OpenTelemetry SDK by `tracing-opentelemetry`, so application code
//!   never talks to the SDK directly
//! - Sampling is parent-based: a sampled inbound context stays sampled
//! - When span export is disabled only the fmt subscriber is installed;
//!   the demo endpoints keep working without a collector

use opentelemetry::trace::{TraceContextExt, TracerProvider as _};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use thiserror::Error;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::schema::TelemetryConfig;

/// Errors that can occur during telemetry initialization.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize OTLP exporter: {0}")]
    Init(String),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

/// Handle to the installed telemetry stack.
///
/// Holds the tracer provider so buffered spans can be flushed at exit.
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flush buffered spans and shut the provider down.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Tracer provider shutdown failed");
            }
        }
    }
}

/// Initialize the telemetry stack from configuration.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let fmt_layer = tracing_subscriber::fmt::layer();

    if !config.enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

        tracing::info!("Span export disabled; logging only");
        return Ok(Telemetry { provider: None });
    }

    // W3C traceparent/tracestate as the propagation format. Swapping the
    // propagator here changes the wire format for the whole service.
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", config.service_version.clone()),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ]);

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    let provider = TracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            config.sampling_rate,
        ))))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter, runtime::Tokio)
        .build();

    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(config.service_name.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    Ok(Telemetry {
        provider: Some(provider),
    })
}

/// Trace id of the currently active span, for log correlation and for
/// echoing to clients.
pub fn current_trace_id() -> Option<String> {
    let context = tracing::Span::current().context();
    let span = context.span();
    let span_context = span.span_context();
    span_context
        .is_valid()
        .then(|| span_context.trace_id().to_string())
}
