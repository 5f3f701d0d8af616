// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keyfort vault.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `KEYFORT_` prefix.

pub mod loader;
pub mod model;

pub use model::KeyfortConfig;

use keyfort_core::KeyfortError;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point: files and `KEYFORT_*` env vars are
/// layered via figment, then the result is checked for values figment
/// cannot reject on its own.
pub fn load() -> Result<KeyfortConfig, KeyfortError> {
    let config = loader::load_config().map_err(|e| KeyfortError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_from_str(toml_content: &str) -> Result<KeyfortConfig, KeyfortError> {
    let config = loader::load_config_from_str(toml_content)
        .map_err(|e| KeyfortError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Post-deserialization validation.
fn validate(config: &KeyfortConfig) -> Result<(), KeyfortError> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.log_level.as_str()) {
        return Err(KeyfortError::Config(format!(
            "invalid log_level '{}' (expected one of: trace, debug, info, warn, error)",
            config.log_level
        )));
    }

    let url = &config.client.server_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(KeyfortError::Config(format!(
            "client.server_url '{url}' must start with http:// or https://"
        )));
    }

    Ok(())
}
