// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM sealed-blob operations.
//!
//! The sealed layout is `nonce(12) ‖ ciphertext ‖ tag(16)` in a single
//! buffer, so the server stores one opaque column and no separate nonce
//! field. Every call to [`seal`] draws a fresh random 96-bit nonce from the
//! system CSPRNG. Nonce reuse would be catastrophic for GCM security.

use keyfort_core::KeyfortError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

/// Length of the GCM nonce prefix in bytes.
pub const NONCE_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt plaintext, returning `nonce ‖ ciphertext ‖ tag`.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, KeyfortError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| KeyfortError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    let sealing = LessSafeKey::new(unbound);

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| KeyfortError::Crypto("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the plaintext buffer is extended with the tag, then
    // prefixed with the nonce for the wire.
    let mut in_out = plaintext.to_vec();
    sealing
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| KeyfortError::Crypto("AES-256-GCM encryption failed".to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + in_out.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&in_out);
    Ok(sealed)
}

/// Decrypt a sealed buffer produced by [`seal`].
///
/// Fails with an integrity error when the buffer is truncated, the tag does
/// not verify, or the key is wrong. Never returns partial plaintext.
pub fn open(key: &[u8; 32], sealed: &[u8]) -> Result<Vec<u8>, KeyfortError> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(KeyfortError::Integrity(format!(
            "sealed blob too short ({} bytes)",
            sealed.len()
        )));
    }

    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| KeyfortError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    let opening = LessSafeKey::new(unbound);

    let nonce_bytes: [u8; NONCE_LEN] = sealed[..NONCE_LEN]
        .try_into()
        .map_err(|_| KeyfortError::Integrity("malformed nonce prefix".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = sealed[NONCE_LEN..].to_vec();
    let plaintext = opening
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            KeyfortError::Integrity(
                "authentication tag mismatch -- wrong key or corrupted data".to_string(),
            )
        })?;

    Ok(plaintext.to_vec())
}
