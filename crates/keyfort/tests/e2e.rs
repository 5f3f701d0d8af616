// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete sync pipeline.
//!
//! Each test runs a real vault server on an ephemeral port backed by a temp
//! SQLite database, and drives it with real clients. Tests are independent
//! and order-insensitive.

use keyfort_client::VaultClient;
use keyfort_core::{KeyfortError, VaultDocument, VaultEntry};
use keyfort_crypto::CryptoEngine;
use keyfort_server::{serve, AppState};
use keyfort_storage::Database;

/// Spawn a server on 127.0.0.1:0 and return its base URL.
///
/// The TempDir keeps the backing database alive for the test's duration.
async fn spawn_server() -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("vault.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

    let state = AppState {
        db,
        system_name: "keyfort".to_string(),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    (format!("http://{addr}"), dir)
}

fn client_for(base_url: &str, username: &str, secret: &[u8]) -> VaultClient {
    let engine = CryptoEngine::new(secret).unwrap();
    VaultClient::new(base_url, username, engine).unwrap()
}

/// An address nothing is listening on.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn login(username: &str, password: &str) -> VaultEntry {
    VaultEntry::Login {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ---- Register / push / pull round trip ----

#[tokio::test]
async fn register_push_pull_round_trip() {
    let (url, _dir) = spawn_server().await;
    let client = client_for(&url, "alice", b"alice token");

    let message = client.register().await.unwrap();
    assert!(message.contains("alice"));

    // A fresh account pulls an empty vault.
    assert!(client.pull().await.unwrap().is_empty());

    let mut doc = VaultDocument::new();
    doc.insert("example.com".into(), login("u", "p"));
    doc.insert(
        "billing-api".into(),
        VaultEntry::ApiKey {
            key: "AKIA".into(),
            secret: "wJal".into(),
        },
    );
    client.push(&doc).await.unwrap();

    // A second session with the same token sees the identical document.
    let later = client_for(&url, "alice", b"alice token");
    assert_eq!(later.pull().await.unwrap(), doc);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (url, _dir) = spawn_server().await;
    let client = client_for(&url, "alice", b"alice token");

    client.register().await.unwrap();
    let err = client.register().await.unwrap_err();
    assert!(matches!(err, KeyfortError::DuplicateUser(u) if u == "alice"));
}

#[tokio::test]
async fn upload_for_unregistered_user_is_not_found() {
    let (url, _dir) = spawn_server().await;
    let client = client_for(&url, "bob", b"bob token");

    let mut doc = VaultDocument::new();
    doc.insert("site".into(), login("u", "p"));

    let err = client.push(&doc).await.unwrap_err();
    assert!(matches!(err, KeyfortError::UserNotFound(u) if u == "bob"));
}

// ---- Authentication ----

#[tokio::test]
async fn wrong_token_is_unauthorized_and_blob_survives() {
    let (url, _dir) = spawn_server().await;
    let genuine = client_for(&url, "alice", b"alice token");

    genuine.register().await.unwrap();
    let mut doc = VaultDocument::new();
    doc.insert("example.com".into(), login("u", "p"));
    genuine.push(&doc).await.unwrap();

    // Same username, different token: different fingerprint.
    let imposter = client_for(&url, "alice", b"not alice's token");
    assert_ne!(genuine.auth_fingerprint(), imposter.auth_fingerprint());

    let mut forged = VaultDocument::new();
    forged.insert("evil".into(), login("x", "y"));
    let err = imposter.push(&forged).await.unwrap_err();
    assert!(matches!(err, KeyfortError::AuthenticationFailed));

    let err = imposter.pull().await.unwrap_err();
    assert!(matches!(err, KeyfortError::AuthenticationFailed));

    // The stored vault is untouched.
    assert_eq!(genuine.pull().await.unwrap(), doc);
}

// ---- Empty vault rules ----

#[tokio::test]
async fn pushing_an_empty_vault_is_rejected() {
    let (url, _dir) = spawn_server().await;
    let client = client_for(&url, "alice", b"alice token");
    client.register().await.unwrap();

    let err = client.push(&VaultDocument::new()).await.unwrap_err();
    assert!(matches!(err, KeyfortError::EmptyBlob));
}

// ---- Offline behavior ----

#[tokio::test]
async fn offline_pull_degrades_but_offline_push_fails() {
    let client = client_for(&dead_url(), "alice", b"alice token");

    // Pull degrades to an empty vault without raising.
    assert!(client.pull().await.unwrap().is_empty());

    // A push under the same condition must fail loudly rather than
    // silently replace the remote vault with the empty document.
    let mut doc = VaultDocument::new();
    doc.insert("site".into(), login("u", "p"));
    let err = client.push(&doc).await.unwrap_err();
    assert!(matches!(err, KeyfortError::Network { .. }));
}

// ---- Concurrency hazard (pinned behavior, not a feature) ----

#[tokio::test]
async fn concurrent_sessions_race_last_write_wins() {
    let (url, _dir) = spawn_server().await;
    let session_a = client_for(&url, "alice", b"alice token");
    let session_b = client_for(&url, "alice", b"alice token");
    session_a.register().await.unwrap();

    // Both sessions pull the same (empty) state.
    let mut vault_a = session_a.pull().await.unwrap();
    let mut vault_b = session_b.pull().await.unwrap();

    // Each adds its own entry and pushes, B after A with no intervening
    // pull. B's whole-document replacement silently drops A's entry.
    vault_a.insert("from-a".into(), login("a", "1"));
    session_a.push(&vault_a).await.unwrap();

    vault_b.insert("from-b".into(), login("b", "2"));
    session_b.push(&vault_b).await.unwrap();

    let merged = session_a.pull().await.unwrap();
    assert!(merged.contains_key("from-b"));
    assert!(
        !merged.contains_key("from-a"),
        "expected last-write-wins to drop the earlier session's entry"
    );
}

// ---- Health probe ----

#[tokio::test]
async fn health_probe_reports_online() {
    let (url, _dir) = spawn_server().await;

    let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "online");
    assert_eq!(body["system"], "keyfort");
}

// ---- Server blindness ----

#[tokio::test]
async fn stored_blob_is_opaque_ciphertext() {
    let (url, _dir) = spawn_server().await;
    let client = client_for(&url, "alice", b"alice token");
    client.register().await.unwrap();

    let mut doc = VaultDocument::new();
    doc.insert("example.com".into(), login("visible-username", "hunter2"));
    client.push(&doc).await.unwrap();

    // Fetch the raw stored blob over the wire and check no plaintext leaked.
    let http = reqwest::Client::new();
    let response: serde_json::Value = http
        .post(format!("{url}/vault/download"))
        .json(&serde_json::json!({
            "username": "alice",
            "client_auth_hash": client.auth_fingerprint(),
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let blob = response["vault_blob"].as_str().unwrap();
    assert!(!blob.is_empty());
    assert!(!blob.contains("hunter2"));
    assert!(!blob.contains("visible-username"));
}
