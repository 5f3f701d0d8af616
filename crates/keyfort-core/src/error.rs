// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keyfort vault.

use thiserror::Error;

/// The primary error type used across all Keyfort crates.
///
/// The protocol variants (`DuplicateUser`, `UserNotFound`,
/// `AuthenticationFailed`, `EmptyBlob`) map one-to-one onto the server's
/// HTTP error responses; everything else is surfaced to the caller.
#[derive(Debug, Error)]
pub enum KeyfortError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The master-secret token is missing or unreadable.
    ///
    /// Fatal, and raised before any network or crypto call is attempted.
    #[error("security token unavailable: {0}")]
    TokenUnavailable(String),

    /// Key derivation or cipher setup failed.
    #[error("crypto failure: {0}")]
    Crypto(String),

    /// Authentication-tag verification failed during decryption: the blob
    /// is corrupted, tampered with, or sealed under a different key.
    /// Never yields a partial document.
    #[error("vault integrity check failed: {0}")]
    Integrity(String),

    /// Storage backend errors (database open, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Registration for a username that already exists.
    #[error("username '{0}' is already registered")]
    DuplicateUser(String),

    /// Upload or download against an unregistered username.
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// The presented fingerprint does not match the stored one.
    #[error("invalid authentication")]
    AuthenticationFailed,

    /// Upload carried a missing or empty vault blob.
    #[error("no vault blob provided")]
    EmptyBlob,

    /// Transport-level failure reaching the server.
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected non-success response from the server.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
