//! Inbound trace-context propagation.
//!
//! # Responsibilities
//! - Extract a trace context from inbound request headers
//! - Open the server span and parent it to the caller's trace
//! - Keep concurrent requests on separate context snapshots
//!
//! # Design Decisions
//! - The extracted context is attached to the server span and the whole
//!   downstream call chain runs under `.instrument(span)`; the subscriber
//!   carries the context across every await point, so there is no shared
//!   mutable "current context" to race on
//! - Extraction never fails the request: an unusable context simply
//!   starts a new root trace
//! - The response passes through unmodified

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use opentelemetry::trace::TraceContextExt;
use tracing::field::Empty;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::observability::propagation::extract_context;
use crate::observability::{metrics, span};

/// Wrap one inbound request in a server span parented to the caller's
/// trace context, when a usable one is present in the headers.
pub async fn propagate_inbound_context(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    // Route template when matched, raw path otherwise
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let http_span = tracing::info_span!(
        "http_request",
        otel.kind = "server",
        http.request.method = %method,
        http.route = %route,
        url.path = %request.uri().path(),
        http.response.status_code = Empty,
    );

    let remote_context = extract_context(request.headers());
    if remote_context.span().span_context().is_valid() {
        http_span.set_parent(remote_context);
    }

    async move {
        let response = next.run(request).await;

        let status = response.status();
        tracing::Span::current().record("http.response.status_code", status.as_u16());
        if status.is_server_error() {
            span::record_error_message(&format!("server error: {status}"));
        }
        metrics::record_request(method.as_str(), status.as_u16(), start);

        response
    }
    .instrument(http_span)
    .await
}
