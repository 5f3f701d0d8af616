// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Keyfort vault.
//!
//! This crate provides the error taxonomy, the decrypted document model,
//! and the JSON wire contract shared by the client and the server. It
//! deliberately contains no cryptography and no I/O, so both sides of the
//! protocol can depend on it without pulling in each other's stack.

pub mod document;
pub mod error;
pub mod wire;

// Re-export key items at crate root for ergonomic imports.
pub use document::{VaultDocument, VaultEntry};
pub use error::KeyfortError;
