//! W3C Trace Context propagation over HTTP headers.
//!
//! # Responsibilities
//! - Extract trace context from incoming request headers
//! - Inject trace context into outgoing request headers
//!
//! # Design Decisions
//! - The concrete wire format is owned by the globally registered
//!   text-map propagator, keeping the format pluggable
//! - Extraction is total: malformed or absent headers yield the default
//!   (empty) context instead of an error

use std::str::FromStr;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector};
use opentelemetry::{global, Context};

/// Adapter reading propagation fields out of an HTTP header map.
pub struct HeaderExtractor<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HeaderExtractor<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.headers.keys().map(|k| k.as_str()).collect()
    }
}

/// Adapter writing propagation fields into an HTTP header map.
pub struct HeaderInjector<'a> {
    headers: &'a mut HeaderMap,
}

impl<'a> HeaderInjector<'a> {
    pub fn new(headers: &'a mut HeaderMap) -> Self {
        Self { headers }
    }
}

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        // Values the propagator produces are always valid header text;
        // anything else is silently dropped rather than failing the request.
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_str(key),
            HeaderValue::from_str(&value),
        ) {
            self.headers.insert(name, value);
        }
    }
}

/// Extract a trace context from request headers.
///
/// Runs the globally registered propagator over the header map. Never
/// fails: when no usable `traceparent` is present the returned context
/// carries an invalid span context, which callers treat as "no remote
/// parent".
pub fn extract_context(headers: &HeaderMap) -> Context {
    global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor::new(headers))
    })
}

/// Inject a trace context into outgoing request headers.
pub fn inject_context(cx: &Context, headers: &mut HeaderMap) {
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(cx, &mut HeaderInjector::new(headers));
    });
}
