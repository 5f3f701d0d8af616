// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side cryptography for the Keyfort vault.
//!
//! One master secret, read from a physical token, is split into two
//! computationally independent 256-bit keys via HKDF-SHA256 under distinct
//! domain labels: one seals the vault document, the other exists only to be
//! hashed into the public authentication fingerprint. The server sees the
//! fingerprint and the sealed blob, and nothing else.
//!
//! This crate must never become a dependency of `keyfort-server`: the
//! server is blind by construction, not by convention.

pub mod aead;
pub mod engine;
pub mod kdf;
pub mod token;

pub use engine::CryptoEngine;
pub use token::read_master_secret;
