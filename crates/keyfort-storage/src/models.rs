// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the users table.

/// One registered user.
///
/// `auth_hash` is the fingerprint presented at registration and is
/// immutable afterwards; `vault_blob` is the latest sealed document (empty
/// until the first upload). The store treats the blob as opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub auth_hash: String,
    pub vault_blob: String,
}
