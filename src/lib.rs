//! OpenTelemetry Demo Web Service Library

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use error::ServiceError;
pub use http::HttpServer;
