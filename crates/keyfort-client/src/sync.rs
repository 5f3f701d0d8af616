// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault sync client: register, pull, push.
//!
//! The protocol is deliberately simple: every mutating operation is
//! pull -> mutate in memory -> push, and a push replaces the remote
//! document wholesale. There is no version token, so two concurrent
//! sessions race last-write-wins.

use std::time::Duration;

use keyfort_core::wire::{
    DownloadResponse, ErrorResponse, RegisterRequest, RegisterResponse, UploadResponse,
    VaultSyncRequest,
};
use keyfort_core::{KeyfortError, VaultDocument};
use keyfort_crypto::CryptoEngine;
use tracing::{debug, warn};

/// Default timeout for a single request/response round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the vault sync protocol.
///
/// Owns the crypto engine, so plaintext and the encryption key never cross
/// this boundary. One instance per invocation; keys are never cached across
/// invocations.
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    engine: CryptoEngine,
}

impl VaultClient {
    /// Create a client for `username` against `base_url`.
    pub fn new(
        base_url: &str,
        username: &str,
        engine: CryptoEngine,
    ) -> Result<Self, KeyfortError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KeyfortError::Network {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            engine,
        })
    }

    /// The public authentication fingerprint presented on every call.
    pub fn auth_fingerprint(&self) -> &str {
        self.engine.auth_fingerprint()
    }

    /// Register this token's fingerprint with the server.
    ///
    /// Returns the server's confirmation message. A taken username maps to
    /// [`KeyfortError::DuplicateUser`].
    pub async fn register(&self) -> Result<String, KeyfortError> {
        let body = RegisterRequest {
            username: self.username.clone(),
            client_auth_hash: self.engine.auth_fingerprint().to_string(),
        };
        let response = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_err)?;
        let response = check_status(response, Endpoint::Register, &self.username).await?;
        let parsed: RegisterResponse = response.json().await.map_err(map_transport_err)?;
        Ok(parsed.message)
    }

    /// Download and unseal the remote vault.
    ///
    /// An unreachable server yields an empty document with a logged
    /// warning: at this layer "offline" and "empty vault" are
    /// indistinguishable. If the server comes back before a later push,
    /// that push replaces the remote vault with the local one -- callers
    /// that cannot tolerate this must not push after a degraded pull.
    /// Authentication and integrity failures remain fatal.
    pub async fn pull(&self) -> Result<VaultDocument, KeyfortError> {
        let body = self.sync_request(None);
        let sent = self
            .http
            .post(format!("{}/vault/download", self.base_url))
            .json(&body)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "server unreachable -- treating vault as empty");
                return Ok(VaultDocument::new());
            }
        };

        let response = check_status(response, Endpoint::Download, &self.username).await?;
        let parsed: DownloadResponse = response.json().await.map_err(map_transport_err)?;
        self.engine.decrypt(&parsed.vault_blob)
    }

    /// Seal and upload the document as a complete replacement.
    ///
    /// Any failure is fatal and propagated: a dropped upload must never be
    /// mistaken for a completed sync. Returns the byte count the server
    /// reports stored.
    pub async fn push(&self, document: &VaultDocument) -> Result<u64, KeyfortError> {
        let blob = self.engine.encrypt(document)?;
        let body = self.sync_request(Some(blob));
        let response = self
            .http
            .post(format!("{}/vault/upload", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_err)?;
        let response = check_status(response, Endpoint::Upload, &self.username).await?;
        let parsed: UploadResponse = response.json().await.map_err(map_transport_err)?;
        debug!(bytes = parsed.bytes_stored, "vault synced");
        Ok(parsed.bytes_stored)
    }

    fn sync_request(&self, vault_blob: Option<String>) -> VaultSyncRequest {
        VaultSyncRequest {
            username: self.username.clone(),
            client_auth_hash: self.engine.auth_fingerprint().to_string(),
            vault_blob,
        }
    }
}

/// Which endpoint a response came from; drives status-code mapping.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Register,
    Upload,
    Download,
}

/// Map a non-success response onto the protocol's error taxonomy.
async fn check_status(
    response: reqwest::Response,
    endpoint: Endpoint,
    username: &str,
) -> Result<reqwest::Response, KeyfortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("HTTP {status}"));

    Err(match (endpoint, status.as_u16()) {
        (Endpoint::Register, 400) => KeyfortError::DuplicateUser(username.to_string()),
        (Endpoint::Upload, 400) => KeyfortError::EmptyBlob,
        (_, 404) => KeyfortError::UserNotFound(username.to_string()),
        (_, 401) => KeyfortError::AuthenticationFailed,
        _ => KeyfortError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

fn map_transport_err(e: reqwest::Error) -> KeyfortError {
    KeyfortError::Network {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
