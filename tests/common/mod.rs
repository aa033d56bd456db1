//! Shared utilities for integration testing.
//!
//! Installs a thread-local telemetry stack backed by an in-memory span
//! exporter, so tests can assert on exported spans without a running
//! collector. Tests using the harness must run on a current-thread
//! runtime (the `#[tokio::test]` default) so the thread-local subscriber
//! stays in effect across every await point.

#![allow(dead_code)]

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
use opentelemetry_sdk::trace::TracerProvider;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// In-memory telemetry stack scoped to one test.
pub struct TelemetryHarness {
    exporter: InMemorySpanExporter,
    _provider: TracerProvider,
    _guard: DefaultGuard,
}

/// Install the W3C propagator and an in-memory exporter for the current
/// thread. Dropping the returned harness uninstalls the subscriber.
pub fn install_telemetry() -> TelemetryHarness {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = InMemorySpanExporter::default();
    let provider = TracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    let tracer = provider.tracer("integration-test");

    // Same default filter as `init_telemetry`, so the in-memory stack
    // records the same spans as the production subscriber (in particular,
    // `tower_http`'s debug-level request span stays filtered out).
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("otel_demo=debug,info"))
        .with(tracing_opentelemetry::layer().with_tracer(tracer));
    let guard = tracing::subscriber::set_default(subscriber);

    TelemetryHarness {
        exporter,
        _provider: provider,
        _guard: guard,
    }
}

impl TelemetryHarness {
    /// All spans exported so far.
    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.exporter
            .get_finished_spans()
            .expect("in-memory exporter never fails")
    }

    /// The single exported span with the given name; panics when the
    /// name is missing or ambiguous.
    pub fn span_named(&self, name: &str) -> SpanData {
        let spans = self.finished_spans();
        let mut matches = spans.iter().filter(|s| s.name == name);
        let found = matches
            .next()
            .unwrap_or_else(|| panic!("no span named '{name}' was exported"))
            .clone();
        assert!(
            matches.next().is_none(),
            "more than one span named '{name}' was exported"
        );
        found
    }
}

/// Look up a span attribute by key, rendered as a string.
pub fn attribute(span: &SpanData, key: &str) -> Option<String> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.to_string())
}
