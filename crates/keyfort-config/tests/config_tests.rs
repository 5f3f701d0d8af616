// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading and validation.

use keyfort_config::{load_from_str, KeyfortConfig};

#[test]
fn defaults_are_valid() {
    let config = load_from_str("").expect("default config should be valid");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.client.server_url, "http://127.0.0.1:3333");
    assert!(config.client.username.is_none());
    assert!(config.client.token_path.is_none());
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3333);
    assert_eq!(config.server.system_name, "keyfort");
    assert!(!config.storage.database_path.is_empty());
}

#[test]
fn toml_overrides_defaults() {
    let config = load_from_str(
        r#"
        log_level = "debug"

        [client]
        server_url = "https://vault.example.net"
        username = "mallory"
        token_path = "/media/token/pass.key"

        [server]
        host = "0.0.0.0"
        port = 8443

        [storage]
        database_path = "/var/lib/keyfort/vault.db"
        "#,
    )
    .unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.client.server_url, "https://vault.example.net");
    assert_eq!(config.client.username.as_deref(), Some("mallory"));
    assert_eq!(config.client.token_path.as_deref(), Some("/media/token/pass.key"));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8443);
    assert_eq!(config.storage.database_path, "/var/lib/keyfort/vault.db");
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = load_from_str(
        r#"
        [server]
        port = 4444
        "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 4444);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.client.server_url, "http://127.0.0.1:3333");
}

#[test]
fn unknown_keys_are_rejected() {
    let result = load_from_str(
        r#"
        [client]
        sever_url = "http://typo.example"
        "#,
    );
    assert!(result.is_err(), "unknown keys must not be silently ignored");
}

#[test]
fn unknown_sections_are_rejected() {
    let result = load_from_str(
        r#"
        [telemetry]
        enabled = true
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn invalid_log_level_is_rejected() {
    let result = load_from_str(r#"log_level = "verbose""#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("log_level"), "got: {err}");
}

#[test]
fn non_http_server_url_is_rejected() {
    let result = load_from_str(
        r#"
        [client]
        server_url = "ftp://vault.example.net"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn default_struct_matches_empty_config() {
    let from_toml = load_from_str("").unwrap();
    let from_default = KeyfortConfig::default();
    assert_eq!(from_toml.log_level, from_default.log_level);
    assert_eq!(from_toml.server.port, from_default.server.port);
}
