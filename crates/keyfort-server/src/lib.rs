// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server for the Keyfort vault sync protocol.
//!
//! The server authenticates every request by byte-for-byte comparison of
//! the presented fingerprint against the stored one, and never parses,
//! decrypts, or inspects blob contents. That blindness is structural: this
//! crate has no dependency on `keyfort-crypto`, so no decryption-capable
//! type can appear in server code.

pub mod handlers;
pub mod server;

pub use server::{router, serve, start_server, AppState, ServerConfig};
