// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The client-side crypto engine: document sealing, unsealing, and the
//! server authentication fingerprint.
//!
//! An engine is built once per invocation from the master secret and holds
//! only the encryption key plus the precomputed fingerprint. The
//! authentication key is dropped as soon as the fingerprint is computed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use keyfort_core::{KeyfortError, VaultDocument};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::aead;
use crate::kdf;

/// Seals and unseals vault documents and answers for the user.
pub struct CryptoEngine {
    /// The vault encryption key -- never leaves this struct.
    k_enc: Zeroizing<[u8; 32]>,
    /// Hex SHA-256 digest of the authentication key; safe to show the
    /// server, stable across sessions.
    auth_fingerprint: String,
}

impl std::fmt::Debug for CryptoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoEngine")
            .field("k_enc", &"[REDACTED]")
            .field("auth_fingerprint", &self.auth_fingerprint)
            .finish()
    }
}

impl CryptoEngine {
    /// Derive both keys from the master secret and precompute the
    /// fingerprint. The authentication key is not retained.
    pub fn new(master_secret: &[u8]) -> Result<Self, KeyfortError> {
        let k_enc = kdf::derive_key(master_secret, kdf::ENCRYPTION_KEY_LABEL)?;
        let k_auth = kdf::derive_key(master_secret, kdf::AUTH_KEY_LABEL)?;
        let auth_fingerprint = hex::encode(Sha256::digest(&*k_auth));
        Ok(Self {
            k_enc,
            auth_fingerprint,
        })
    }

    /// The public authentication fingerprint presented on every server call.
    pub fn auth_fingerprint(&self) -> &str {
        &self.auth_fingerprint
    }

    /// Seal a document into a transportable blob:
    /// `base64(nonce ‖ ciphertext ‖ tag)`.
    ///
    /// An empty document short-circuits to the empty sentinel without
    /// touching the cipher.
    pub fn encrypt(&self, document: &VaultDocument) -> Result<String, KeyfortError> {
        if document.is_empty() {
            return Ok(String::new());
        }
        let plaintext = serde_json::to_vec(document).map_err(|e| {
            KeyfortError::Internal(format!("document serialization failed: {e}"))
        })?;
        let sealed = aead::seal(&self.k_enc, &plaintext)?;
        Ok(BASE64.encode(sealed))
    }

    /// Unseal a blob back into a document.
    ///
    /// The empty sentinel yields an empty document. Anything else must
    /// decode, authenticate, and deserialize completely; any failure is an
    /// integrity error, never partial data.
    pub fn decrypt(&self, blob: &str) -> Result<VaultDocument, KeyfortError> {
        if blob.is_empty() {
            return Ok(VaultDocument::new());
        }
        let sealed = BASE64
            .decode(blob)
            .map_err(|e| KeyfortError::Integrity(format!("blob is not valid base64: {e}")))?;
        let plaintext = aead::open(&self.k_enc, &sealed)?;
        serde_json::from_slice(&plaintext).map_err(|e| {
            KeyfortError::Integrity(format!("unsealed payload is not a vault document: {e}"))
        })
    }
}
