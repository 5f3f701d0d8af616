// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HKDF-SHA256 key derivation from the master secret.
//!
//! Extract-and-expand with no salt and a fixed info label per purpose. The
//! two labels below split the master secret into computationally
//! independent keys, so handing the server a digest of the authentication
//! key reveals nothing about the encryption key. Derivation is
//! deterministic: the client rebuilds both keys from the token alone, with
//! no persisted key state.

use hkdf::Hkdf;
use keyfort_core::KeyfortError;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Info label for the vault encryption key.
pub const ENCRYPTION_KEY_LABEL: &[u8] = b"KEYFORT_VAULT_ENCRYPTION_KEY";

/// Info label for the server authentication key.
pub const AUTH_KEY_LABEL: &[u8] = b"KEYFORT_SERVER_AUTH_KEY";

/// Derive a 32-byte key from the master secret under a domain label.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory
/// zeroing on drop.
pub fn derive_key(
    master_secret: &[u8],
    label: &[u8],
) -> Result<Zeroizing<[u8; 32]>, KeyfortError> {
    let hk = Hkdf::<Sha256>::new(None, master_secret);
    let mut okm = Zeroizing::new([0u8; 32]);
    hk.expand(label, okm.as_mut())
        .map_err(|e| KeyfortError::Crypto(format!("HKDF expand failed: {e}")))?;
    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic() {
        let secret = b"master token bytes";

        let key1 = derive_key(secret, ENCRYPTION_KEY_LABEL).unwrap();
        let key2 = derive_key(secret, ENCRYPTION_KEY_LABEL).unwrap();

        assert_eq!(*key1, *key2);
    }

    #[test]
    fn distinct_labels_produce_independent_keys() {
        let secret = b"master token bytes";

        let k_enc = derive_key(secret, ENCRYPTION_KEY_LABEL).unwrap();
        let k_auth = derive_key(secret, AUTH_KEY_LABEL).unwrap();

        assert_ne!(*k_enc, *k_auth);
    }

    #[test]
    fn distinct_secrets_produce_distinct_keys() {
        let key1 = derive_key(b"token one", AUTH_KEY_LABEL).unwrap();
        let key2 = derive_key(b"token two", AUTH_KEY_LABEL).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derived_key_is_32_bytes() {
        let key = derive_key(b"x", ENCRYPTION_KEY_LABEL).unwrap();
        assert_eq!(key.len(), 32);
    }
}
