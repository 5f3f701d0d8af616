// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keyfort serve` command implementation.
//!
//! Opens the store, then runs the axum server until the process is
//! stopped. The server side never touches key material: everything it
//! needs is in the store and the request bodies.

use keyfort_config::KeyfortConfig;
use keyfort_core::KeyfortError;
use keyfort_server::{start_server, AppState, ServerConfig};
use keyfort_storage::Database;
use tracing::info;

/// Run the vault sync server until interrupted.
pub async fn run_serve(config: &KeyfortConfig) -> Result<(), KeyfortError> {
    info!("starting keyfort serve");

    let database_path = &config.storage.database_path;
    if let Some(parent) = std::path::Path::new(database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| KeyfortError::Storage {
                source: Box::new(e),
            })?;
        }
    }

    let db = Database::open(database_path).await?;
    info!(path = %database_path, "store opened");

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = AppState {
        db,
        system_name: config.server.system_name.clone(),
    };

    start_server(&server_config, state).await
}
