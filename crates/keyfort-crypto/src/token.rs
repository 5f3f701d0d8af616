// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-secret token access.
//!
//! The token is a raw byte file, typically on removable media, and is the
//! sole root of trust. It is read once per invocation, held only in
//! zeroized memory, and never persisted or transmitted.

use std::path::Path;

use keyfort_core::KeyfortError;
use zeroize::Zeroizing;

/// Read the master secret from the token file.
///
/// Fails with [`KeyfortError::TokenUnavailable`] when the file is missing,
/// unreadable, or empty. Callers surface this before attempting any
/// derivation or network call.
pub fn read_master_secret(path: &Path) -> Result<Zeroizing<Vec<u8>>, KeyfortError> {
    let bytes = std::fs::read(path).map_err(|e| {
        KeyfortError::TokenUnavailable(format!("cannot read {}: {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(KeyfortError::TokenUnavailable(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    Ok(Zeroizing::new(bytes))
}
