// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync client for the Keyfort vault protocol.
//!
//! Every blob leaves this crate sealed and every request carries the
//! authentication fingerprint; the server side of the wire never sees key
//! material or plaintext.

pub mod sync;

pub use sync::VaultClient;
