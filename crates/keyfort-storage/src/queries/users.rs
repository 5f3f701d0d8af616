// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-record operations for the sync protocol.
//!
//! The fingerprint comparison for upload and download happens inside the
//! same transaction as the read or write it guards, so a concurrent
//! register or upload can never observe a partially written row.

use keyfort_core::KeyfortError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::UserRecord;

/// Result of the in-transaction fingerprint check.
enum AuthOutcome<T> {
    Granted(T),
    UnknownUser,
    BadFingerprint,
}

impl<T> AuthOutcome<T> {
    fn into_result(self, username: &str) -> Result<T, KeyfortError> {
        match self {
            AuthOutcome::Granted(value) => Ok(value),
            AuthOutcome::UnknownUser => Err(KeyfortError::UserNotFound(username.to_string())),
            AuthOutcome::BadFingerprint => Err(KeyfortError::AuthenticationFailed),
        }
    }
}

/// Insert a new user with an empty vault blob.
///
/// The first fingerprint presented for a username is trusted as-is; there
/// is no rotation operation afterwards. Fails with `DuplicateUser` when the
/// username is already registered.
pub async fn create_user(
    db: &Database,
    username: &str,
    auth_hash: &str,
) -> Result<(), KeyfortError> {
    let username_owned = username.to_string();
    let auth_hash = auth_hash.to_string();
    let inserted = db
        .connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            match conn.execute(
                "INSERT INTO users (username, auth_hash, vault_blob) VALUES (?1, ?2, '')",
                params![username_owned, auth_hash],
            ) {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    if inserted {
        Ok(())
    } else {
        Err(KeyfortError::DuplicateUser(username.to_string()))
    }
}

/// Verify the fingerprint and overwrite the stored blob, atomically.
///
/// Returns the number of bytes stored. An empty blob is rejected before
/// any store access: uploading an empty vault is not a supported operation
/// (only registration itself leaves the blob empty).
pub async fn store_vault_blob(
    db: &Database,
    username: &str,
    presented_hash: &str,
    vault_blob: &str,
) -> Result<u64, KeyfortError> {
    if vault_blob.is_empty() {
        return Err(KeyfortError::EmptyBlob);
    }

    let username_owned = username.to_string();
    let presented = presented_hash.to_string();
    let blob = vault_blob.to_string();
    db.connection()
        .call(move |conn| -> Result<AuthOutcome<u64>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let stored: Option<String> = match tx.query_row(
                "SELECT auth_hash FROM users WHERE username = ?1",
                params![username_owned],
                |row| row.get(0),
            ) {
                Ok(hash) => Some(hash),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e),
            };
            let Some(stored) = stored else {
                return Ok(AuthOutcome::UnknownUser);
            };
            if stored != presented {
                return Ok(AuthOutcome::BadFingerprint);
            }

            let bytes = blob.len() as u64;
            tx.execute(
                "UPDATE users SET vault_blob = ?1 WHERE username = ?2",
                params![blob, username_owned],
            )?;
            tx.commit()?;
            Ok(AuthOutcome::Granted(bytes))
        })
        .await
        .map_err(map_tr_err)?
        .into_result(username)
}

/// Verify the fingerprint and return the stored blob.
///
/// A registered user with no upload yet gets the empty sentinel.
pub async fn fetch_vault_blob(
    db: &Database,
    username: &str,
    presented_hash: &str,
) -> Result<String, KeyfortError> {
    let username_owned = username.to_string();
    let presented = presented_hash.to_string();
    db.connection()
        .call(move |conn| -> Result<AuthOutcome<String>, rusqlite::Error> {
            let row: Option<(String, String)> = match conn.query_row(
                "SELECT auth_hash, vault_blob FROM users WHERE username = ?1",
                params![username_owned],
                |row| Ok((row.get(0)?, row.get(1)?)),
            ) {
                Ok(row) => Some(row),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e),
            };
            let Some((stored, blob)) = row else {
                return Ok(AuthOutcome::UnknownUser);
            };
            if stored != presented {
                return Ok(AuthOutcome::BadFingerprint);
            }
            Ok(AuthOutcome::Granted(blob))
        })
        .await
        .map_err(map_tr_err)?
        .into_result(username)
}

/// Fetch a full user record without authentication.
///
/// Store-level accessor for tests and tooling; the sync endpoints never
/// expose it.
pub async fn fetch_user(
    db: &Database,
    username: &str,
) -> Result<Option<UserRecord>, KeyfortError> {
    let username_owned = username.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<UserRecord>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT username, auth_hash, vault_blob FROM users WHERE username = ?1",
                params![username_owned],
                |row| {
                    Ok(UserRecord {
                        username: row.get(0)?,
                        auth_hash: row.get(1)?,
                        vault_blob: row.get(2)?,
                    })
                },
            );
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}
