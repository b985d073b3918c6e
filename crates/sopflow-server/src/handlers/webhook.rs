//! Webhook endpoint.
//!
//! Validates inbound events and hands them to the approval workflow.
//! The body is read as a raw string so empty bodies, malformed JSON and
//! missing `eventType` each produce their own 400 response before any
//! external call is attempted.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;
use sopflow_confluence::ConfluenceClient;
use sopflow_workflow::{ApprovalWorkflow, WebhookEvent};

use crate::error::ServerError;
use crate::state::AppState;

/// Methods served by the webhook route.
const SUPPORTED_METHODS: [&str; 2] = ["GET", "POST"];

/// Handle `GET /webhook` (health check). No side effects.
pub(crate) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "message": "Approval webhook service is running",
        "timestamp": Utc::now().to_rfc3339(),
        "service": "sopflow",
        "version": state.version,
        "supportedMethods": SUPPORTED_METHODS,
    }))
}

/// Handle `POST /webhook`: validate, dispatch, respond.
pub(crate) async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, ServerError> {
    if body.is_empty() {
        return Err(ServerError::EmptyBody);
    }

    let event: WebhookEvent =
        serde_json::from_str(&body).map_err(|e| ServerError::InvalidJson(e.to_string()))?;

    let Some(event_type) = event.event_type.clone().filter(|t| !t.is_empty()) else {
        return Err(ServerError::MissingEventType);
    };

    tracing::info!(event_type = %event_type, "Webhook event received");

    let client =
        ConfluenceClient::from_config(&state.confluence).map_err(ServerError::Configuration)?;
    let workflow = ApprovalWorkflow::new(client);

    // The workflow issues blocking HTTP calls; keep them off the async
    // worker threads.
    let outcome = tokio::task::spawn_blocking(move || workflow.handle_event(&event))
        .await?
        .map_err(|source| ServerError::Processing {
            event_type: event_type.clone(),
            source,
        })?;

    Ok(Json(json!({
        "message": "Webhook processed successfully",
        "timestamp": Utc::now().to_rfc3339(),
        "eventType": event_type,
        "result": outcome,
    })))
}

/// Handle any other method on `/webhook`.
pub(crate) async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": format!("Method {method} not allowed"),
            "supportedMethods": SUPPORTED_METHODS,
        })),
    )
}
