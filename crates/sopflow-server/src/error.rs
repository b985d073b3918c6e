//! Error types for the HTTP server.
//!
//! The dispatcher boundary is the single place failures become HTTP
//! responses: validation failures map to 400, configuration failures
//! and processing failures to distinct 500 bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sopflow_confluence::ConfluenceError;
use sopflow_workflow::WorkflowError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// POST with an empty body.
    #[error("Empty request body")]
    EmptyBody,

    /// POST with a body that is not valid JSON (or fails payload
    /// validation during deserialization).
    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(String),

    /// POST with a JSON body lacking the mandatory `eventType` field.
    #[error("Missing eventType in webhook data")]
    MissingEventType,

    /// Confluence client construction failed (incomplete credentials).
    #[error("Confluence service configuration error: {0}")]
    Configuration(#[source] ConfluenceError),

    /// Event processing failed after validation.
    #[error("Error processing {event_type} event: {source}")]
    Processing {
        event_type: String,
        source: WorkflowError,
    },

    /// The blocking workflow task failed to complete.
    #[error("Webhook task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::EmptyBody => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Empty request body"}),
            ),
            Self::InvalidJson(details) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid JSON in request body", "details": details}),
            ),
            Self::MissingEventType => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Missing eventType in webhook data"}),
            ),
            Self::Configuration(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Confluence service configuration error", "details": e.to_string()}),
            ),
            Self::Processing { event_type, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Error processing webhook event",
                    "eventType": event_type,
                    "details": source.to_string(),
                }),
            ),
            Self::TaskJoin(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error", "details": e.to_string()}),
            ),
        };

        tracing::error!(status = %status, error = %self, "Request failed");

        (status, axum::Json(body)).into_response()
    }
}
