//! Status discipline for traced operations.
//!
//! Every traced operation in this service follows the same lifecycle:
//! open a named span, set descriptive attributes, run the body under
//! `.instrument(span)`, and record a terminal status before the scope
//! closes. Tying the span to the instrumented future means it ends
//! exactly once on every exit path, success or error, without manual
//! end calls at each return site. Recording a status after the span
//! has closed is a no-op.

use opentelemetry::trace::Status;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Mark the current span's terminal status as OK.
pub fn record_ok() {
    tracing::Span::current().set_status(Status::Ok);
}

/// Mark the current span's terminal status as an error.
pub fn record_error(error: &dyn std::error::Error) {
    record_error_message(&error.to_string());
}

/// Mark the current span's terminal status as an error with a message.
pub fn record_error_message(message: &str) {
    let span = tracing::Span::current();
    span.set_attribute("error", true);
    span.set_status(Status::error(message.to_string()));
}
