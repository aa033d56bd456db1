//! Handler error mapping.
//!
//! # Responsibilities
//! - Map handler failures to HTTP status codes and JSON error bodies
//! - Record the failure on the active span before responding
//!
//! # Design Decisions
//! - Errors are surfaced faithfully: the message the span records is the
//!   message the client receives, never wrapped or swallowed

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures a demo handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("invalid user id '{0}'")]
    InvalidUserId(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}
