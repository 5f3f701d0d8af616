// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault sync HTTP server built on axum.
//!
//! Sets up routes and shared state. Each request is independent and
//! stateless aside from the store; same-username requests serialize at the
//! storage layer's transaction boundary, not here.

use axum::{
    routing::{get, post},
    Router,
};
use keyfort_core::KeyfortError;
use keyfort_storage::Database;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the users store.
    pub db: Database,
    /// System name reported by the health probe.
    pub system_name: String,
}

/// Server configuration (mirrors `[server]` from keyfort-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/vault/upload", post(handlers::upload_vault))
        .route("/vault/download", post(handlers::download_vault))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured host:port and serve until the task is aborted.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), KeyfortError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| KeyfortError::Network {
            message: format!("failed to bind vault server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("vault server listening on {addr}");
    serve(listener, state).await
}

/// Serve requests on an already-bound listener.
///
/// Split from [`start_server`] so callers can bind port 0 and learn the
/// ephemeral address first.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<(), KeyfortError> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| KeyfortError::Network {
            message: format!("vault server error: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3333,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("3333"));
    }
}
