//! Demo route handlers.
//!
//! Each handler is a traced operation: open a named span, set descriptive
//! attributes, run the body (including child spans for sub-operations)
//! under `.instrument`, and record a terminal status before the scope
//! closes. Simulated delays stand in for real I/O so overlapping requests
//! exercise context isolation across await points.

use std::time::Duration;

use axum::extract::Query;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::Instrument;

use crate::http::response::ApiError;
use crate::observability::{span, telemetry};

/// A user record served by the names endpoint.
#[derive(Debug, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

/// Response body for `GET /demo/api/names`.
#[derive(Debug, Serialize)]
pub struct NamesResponse {
    pub success: bool,
    pub users: Vec<User>,
}

/// `GET /demo/api/names`
///
/// The canonical traced-operation demo: a parent span covering the
/// handler, one child span around a simulated database query, and a
/// fixed two-element user list as the payload.
pub async fn get_names() -> Json<NamesResponse> {
    let op_span = tracing::info_span!(
        "fetch-user-data",
        user.operation = "fetch",
        user.source = "database",
    );

    async move {
        run_names_query().await;
        span::record_ok();

        Json(NamesResponse {
            success: true,
            users: vec![
                User {
                    id: 1,
                    name: "Alice".to_string(),
                },
                User {
                    id: 2,
                    name: "Bob".to_string(),
                },
            ],
        })
    }
    .instrument(op_span)
    .await
}

/// Simulated database query; the child span ends when this future
/// completes, strictly before its parent.
async fn run_names_query() {
    let db_span = tracing::info_span!(
        "database.query",
        db.operation = "SELECT",
        db.table = "users",
    );

    async {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    .instrument(db_span)
    .await
}

/// Query parameters for the instrumented endpoint.
#[derive(Debug, Deserialize)]
pub struct InstrumentedParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// A user profile served by the instrumented endpoint.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Processing metadata attached to the instrumented response.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub processed: bool,
    pub timestamp: String,
}

/// Tracing summary echoed back to the client.
#[derive(Debug, Serialize)]
pub struct TracingInfo {
    pub message: String,
    pub spans: Vec<String>,
}

/// Response body for `GET /demo/api/instrumented`.
#[derive(Debug, Serialize)]
pub struct InstrumentedResponse {
    pub success: bool,
    pub user: UserProfile,
    pub metadata: Metadata,
    pub tracing: TracingInfo,
}

/// `GET /demo/api/instrumented?userId=N`
///
/// Multi-step traced operation: input validation and a simulated profile
/// lookup, each under its own child span. An unknown user id surfaces as
/// a 404 after the parent span records an error status.
pub async fn get_instrumented(
    Query(params): Query<InstrumentedParams>,
) -> Result<Json<InstrumentedResponse>, ApiError> {
    let user_id = params.user_id.unwrap_or_else(|| "1".to_string());

    let op_span = tracing::info_span!(
        "process-user-request",
        user.id = %user_id,
    );

    async move {
        let result = process_user_request(&user_id).await;
        match &result {
            Ok(_) => span::record_ok(),
            Err(e) => span::record_error(e),
        }
        result.map(Json)
    }
    .instrument(op_span)
    .await
}

async fn process_user_request(user_id: &str) -> Result<InstrumentedResponse, ApiError> {
    validate_input(user_id).await?;
    let user = fetch_user_profile(user_id).await?;

    let message = match telemetry::current_trace_id() {
        Some(trace_id) => format!("Request traced end to end under trace {trace_id}"),
        None => "Request traced end to end; span export is disabled".to_string(),
    };

    Ok(InstrumentedResponse {
        success: true,
        user,
        metadata: Metadata {
            processed: true,
            timestamp: Utc::now().to_rfc3339(),
        },
        tracing: TracingInfo {
            message,
            spans: vec![
                "process-user-request".to_string(),
                "validate-input".to_string(),
                "fetch-user-profile".to_string(),
            ],
        },
    })
}

async fn validate_input(user_id: &str) -> Result<(), ApiError> {
    let validate_span = tracing::info_span!(
        "validate-input",
        validation.field = "userId",
    );

    async move {
        if user_id.is_empty() || !user_id.chars().all(|c| c.is_ascii_digit()) {
            let err = ApiError::InvalidUserId(user_id.to_string());
            span::record_error(&err);
            return Err(err);
        }
        span::record_ok();
        Ok(())
    }
    .instrument(validate_span)
    .await
}

async fn fetch_user_profile(user_id: &str) -> Result<UserProfile, ApiError> {
    let db_span = tracing::info_span!(
        "fetch-user-profile",
        db.operation = "SELECT",
        db.table = "user_profiles",
    );

    async move {
        tokio::time::sleep(Duration::from_millis(25)).await;

        let profile = match user_id {
            "1" => Some(("Alice", "alice@example.com")),
            "2" => Some(("Bob", "bob@example.com")),
            _ => None,
        };

        match profile {
            Some((name, email)) => {
                span::record_ok();
                Ok(UserProfile {
                    id: user_id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                })
            }
            None => {
                let err = ApiError::UserNotFound(user_id.to_string());
                span::record_error(&err);
                Err(err)
            }
        }
    }
    .instrument(db_span)
    .await
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
