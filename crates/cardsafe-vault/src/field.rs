// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-field encryption format and the explicit decryption outcome.
//!
//! Stored format: `cs1:` + base64(nonce || ciphertext+tag). The version
//! prefix makes legacy plaintext detection deterministic: a stored value
//! without the prefix predates encryption and is passed through unchanged
//! rather than treated as corrupt.
//!
//! Empty strings are stored empty and never encrypted, so an optional
//! field that was never filled in stays visibly empty in the table.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cardsafe_core::CardsafeError;

use crate::crypto;

/// Version prefix marking an encrypted field value.
pub const FIELD_PREFIX: &str = "cs1:";

/// Outcome of opening a stored field value.
///
/// Decrypt failures are never silent: the three-way result lets callers
/// surface a warning instead of displaying a value without knowing
/// whether it was ever decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The value carried the version prefix and decrypted cleanly.
    Decrypted(String),
    /// The value had no version prefix: a pre-encryption legacy value,
    /// returned unchanged.
    LegacyPlaintext(String),
    /// The value carried the version prefix but could not be decrypted
    /// (wrong key or corrupt data). The stored string is returned
    /// unchanged so nothing is lost.
    Undecryptable(String),
}

impl FieldOutcome {
    /// The carried value, regardless of how it was obtained.
    pub fn into_value(self) -> String {
        match self {
            FieldOutcome::Decrypted(v)
            | FieldOutcome::LegacyPlaintext(v)
            | FieldOutcome::Undecryptable(v) => v,
        }
    }
}

/// Encrypt a field value for storage. Empty input maps to empty output.
pub fn seal_field(key: &[u8; 32], plaintext: &str) -> Result<String, CardsafeError> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }
    let sealed = crypto::seal(key, plaintext.as_bytes())?;
    Ok(format!("{FIELD_PREFIX}{}", STANDARD.encode(sealed)))
}

/// Decrypt a stored field value. Never fails; see [`FieldOutcome`].
pub fn open_field(key: &[u8; 32], stored: &str) -> FieldOutcome {
    if stored.is_empty() {
        return FieldOutcome::Decrypted(String::new());
    }
    let Some(body) = stored.strip_prefix(FIELD_PREFIX) else {
        return FieldOutcome::LegacyPlaintext(stored.to_string());
    };
    let Ok(data) = STANDARD.decode(body) else {
        return FieldOutcome::Undecryptable(stored.to_string());
    };
    match crypto::open(key, &data) {
        Ok(plaintext) => match String::from_utf8(plaintext) {
            Ok(value) => FieldOutcome::Decrypted(value),
            Err(_) => FieldOutcome::Undecryptable(stored.to_string()),
        },
        Err(_) => FieldOutcome::Undecryptable(stored.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn roundtrip_restores_plaintext() {
        let key = test_key(3);
        let stored = seal_field(&key, "1234567890123456").unwrap();
        assert!(stored.starts_with(FIELD_PREFIX));
        assert_ne!(stored, "1234567890123456");
        assert_eq!(
            open_field(&key, &stored),
            FieldOutcome::Decrypted("1234567890123456".to_string())
        );
    }

    #[test]
    fn empty_input_is_passed_through_both_ways() {
        let key = test_key(3);
        assert_eq!(seal_field(&key, "").unwrap(), "");
        assert_eq!(open_field(&key, ""), FieldOutcome::Decrypted(String::new()));
    }

    #[test]
    fn unprefixed_value_is_legacy_plaintext() {
        let key = test_key(3);
        assert_eq!(
            open_field(&key, "4111111111111111"),
            FieldOutcome::LegacyPlaintext("4111111111111111".to_string())
        );
    }

    #[test]
    fn wrong_key_yields_undecryptable_with_stored_value_unchanged() {
        let stored = seal_field(&test_key(1), "secret").unwrap();
        let outcome = open_field(&test_key(2), &stored);
        assert_eq!(outcome, FieldOutcome::Undecryptable(stored));
    }

    #[test]
    fn garbage_after_prefix_is_undecryptable() {
        let key = test_key(3);
        let outcome = open_field(&key, "cs1:!!!not-base64!!!");
        assert_eq!(
            outcome,
            FieldOutcome::Undecryptable("cs1:!!!not-base64!!!".to_string())
        );
    }

    #[test]
    fn unicode_plaintext_roundtrips() {
        let key = test_key(9);
        let stored = seal_field(&key, "पिन १२३४").unwrap();
        assert_eq!(
            open_field(&key, &stored),
            FieldOutcome::Decrypted("पिन १२३४".to_string())
        );
    }
}
