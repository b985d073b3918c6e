//! Application state.
//!
//! Shared state for all request handlers. No per-request state lives
//! here: each webhook invocation constructs its own Confluence client
//! from the stored credentials.

use sopflow_config::ConfluenceConfig;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Confluence credentials.
    pub(crate) confluence: ConfluenceConfig,
    /// Application version for the health check.
    pub(crate) version: String,
}
