//! Router construction.
//!
//! Builds the axum router with the webhook route and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/webhook",
            get(handlers::webhook::health_check)
                .post(handlers::webhook::handle_webhook)
                .fallback(handlers::webhook::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
