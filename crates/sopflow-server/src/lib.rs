//! HTTP server for the sopflow approval webhook.
//!
//! Exposes a single `/webhook` route:
//! - `GET` - health check
//! - `POST` - webhook event processing
//! - anything else - 405 with the allowed methods
//!
//! Every response is a JSON body; errors are translated into structured
//! responses by [`error::ServerError`] and nothing escapes the handler
//! boundary.
//!
//! ```text
//! Wiki platform ──POST /webhook──► axum server (sopflow-server)
//!                                      │
//!                                      └─► ApprovalWorkflow (sopflow-workflow)
//!                                              │
//!                                              └─► Confluence REST API
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use sopflow_config::ConfluenceConfig;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Confluence credentials used to build a client per request.
    pub confluence: ConfluenceConfig,
    /// Application version (reported by the health check).
    pub version: String,
}

/// Build the webhook router for a configuration.
///
/// Exposed separately from [`run_server`] so tests can drive the router
/// without binding a socket.
#[must_use]
pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        confluence: config.confluence.clone(),
        version: config.version.clone(),
    });
    app::create_router(state)
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(&config);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting webhook server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from application config.
#[must_use]
pub fn server_config_from_config(config: &sopflow_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        confluence: config.confluence_resolved.clone(),
        version,
    }
}
