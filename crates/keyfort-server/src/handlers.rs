// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the vault sync API.
//!
//! Handles POST /register, POST /vault/upload, POST /vault/download, and
//! the GET / health probe. Validation failures are always explicit error
//! responses, never a generic success.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keyfort_core::wire::{
    DownloadResponse, ErrorResponse, HealthResponse, RegisterRequest, RegisterResponse,
    UploadResponse, VaultSyncRequest,
};
use keyfort_core::KeyfortError;
use keyfort_storage::queries::users;
use tracing::{error, info};

use crate::server::AppState;

/// GET /
///
/// Unauthenticated health probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online".to_string(),
        system: state.system_name.clone(),
    })
}

/// POST /register
///
/// Creates a user record with an empty blob. The first fingerprint
/// presented for a username is trusted; there is no rotation endpoint.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    users::create_user(&state.db, &body.username, &body.client_auth_hash).await?;
    info!(username = %body.username, "user registered");
    Ok(Json(RegisterResponse {
        message: format!("User '{}' registered successfully.", body.username),
    }))
}

/// POST /vault/upload
///
/// Authenticates, then replaces the stored blob wholesale. The store never
/// sees plaintext; `bytes_stored` counts the opaque text it was handed.
pub async fn upload_vault(
    State(state): State<AppState>,
    Json(body): Json<VaultSyncRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let blob = body.vault_blob.as_deref().unwrap_or("");
    let bytes_stored =
        users::store_vault_blob(&state.db, &body.username, &body.client_auth_hash, blob).await?;
    info!(username = %body.username, bytes = bytes_stored, "vault blob stored");
    Ok(Json(UploadResponse {
        status: "synced".to_string(),
        bytes_stored,
    }))
}

/// POST /vault/download
///
/// Authenticates, then returns the stored blob (empty sentinel when no
/// upload has happened yet).
pub async fn download_vault(
    State(state): State<AppState>,
    Json(body): Json<VaultSyncRequest>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let vault_blob =
        users::fetch_vault_blob(&state.db, &body.username, &body.client_auth_hash).await?;
    Ok(Json(DownloadResponse { vault_blob }))
}

/// Maps [`KeyfortError`] onto the protocol's HTTP error contract.
pub struct ApiError(KeyfortError);

impl From<KeyfortError> for ApiError {
    fn from(err: KeyfortError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            KeyfortError::DuplicateUser(_) | KeyfortError::EmptyBlob => StatusCode::BAD_REQUEST,
            KeyfortError::UserNotFound(_) => StatusCode::NOT_FOUND,
            KeyfortError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Validation failures carry their message; anything else is logged
        // server-side and reported opaquely.
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
