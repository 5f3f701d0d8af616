// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./keyfort.toml` > `~/.config/keyfort/keyfort.toml`
//! > `/etc/keyfort/keyfort.toml`, with environment variable overrides via
//! the `KEYFORT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KeyfortConfig;

/// Load configuration from the standard XDG hierarchy with env overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyfort/keyfort.toml` (system-wide)
/// 3. `~/.config/keyfort/keyfort.toml` (user XDG config)
/// 4. `./keyfort.toml` (local directory)
/// 5. `KEYFORT_*` environment variables
pub fn load_config() -> Result<KeyfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyfortConfig::default()))
        .merge(Toml::file("/etc/keyfort/keyfort.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("keyfort/keyfort.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("keyfort.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<KeyfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyfortConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeyfortConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyfortConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using an explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `KEYFORT_CLIENT_TOKEN_PATH` must map to
/// `client.token_path`, not `client.token.path`. Section names are only
/// recognized at the start of the key -- `KEYFORT_CLIENT_SERVER_URL` maps
/// to `client.server_url`, untouched by the `server` section.
fn env_provider() -> Env {
    Env::prefixed("KEYFORT_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: KEYFORT_CLIENT_SERVER_URL -> "client_server_url"
        let key_str = key.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("client_") {
            format!("client.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("server_") {
            format!("server.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("storage_") {
            format!("storage.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
