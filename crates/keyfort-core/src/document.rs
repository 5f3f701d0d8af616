// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decrypted vault document and its entry variants.
//!
//! A document only ever exists client-side, in memory, between a pull and
//! the push that supersedes it. The server stores nothing but the sealed
//! form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user's decrypted credential document: entry name -> entry record.
///
/// Entry names are unique per user and case-sensitive. `BTreeMap` keeps
/// serialization canonical (keys sorted), so the same document always
/// produces the same plaintext bytes.
pub type VaultDocument = BTreeMap<String, VaultEntry>;

/// A single credential entry.
///
/// Closed set: an unknown `kind` discriminator is a deserialization error,
/// never passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaultEntry {
    /// Username/password login for a site or service.
    Login { username: String, password: String },

    /// API key pair.
    ApiKey { key: String, secret: String },

    /// Payment card.
    Card {
        holder: String,
        number: String,
        expiry: String,
        cvv: String,
        pin: String,
    },
}
