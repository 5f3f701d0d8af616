// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON wire types for the sync protocol.
//!
//! Shared verbatim by the client and the server so the two sides cannot
//! drift. The vault blob travels as opaque text; the empty string is the
//! canonical "no data yet" sentinel.

use serde::{Deserialize, Serialize};

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username to register.
    pub username: String,
    /// Hex SHA-256 fingerprint of the client's authentication key.
    pub client_auth_hash: String,
}

/// Body of `POST /vault/upload` and `POST /vault/download`.
///
/// `vault_blob` is only meaningful for uploads; downloads omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSyncRequest {
    /// Username the request is for.
    pub username: String,
    /// Fingerprint presented for authentication.
    pub client_auth_hash: String,
    /// Sealed vault blob (uploads only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_blob: Option<String>,
}

/// Response body for `POST /register`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Response body for `POST /vault/upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always `"synced"` on success.
    pub status: String,
    /// Size of the stored blob in bytes.
    pub bytes_stored: u64,
}

/// Response body for `POST /vault/download`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// The stored blob, or the empty sentinel when no upload has happened.
    pub vault_blob: String,
}

/// Response body for the `GET /` health probe.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"online"`.
    pub status: String,
    /// Configured system name.
    pub system: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_request_omits_blob_field() {
        let req = VaultSyncRequest {
            username: "alice".into(),
            client_auth_hash: "ab".repeat(32),
            vault_blob: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("vault_blob"), "got: {json}");
    }

    #[test]
    fn sync_request_deserializes_without_blob() {
        let json = r#"{"username": "alice", "client_auth_hash": "deadbeef"}"#;
        let req: VaultSyncRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.vault_blob.is_none());
    }

    #[test]
    fn upload_response_serializes() {
        let resp = UploadResponse {
            status: "synced".into(),
            bytes_stored: 172,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"synced\""));
        assert!(json.contains("\"bytes_stored\":172"));
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "online".into(),
            system: "keyfort".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"online\""));
        assert!(json.contains("\"system\":\"keyfort\""));
    }
}
