// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-password verifier stored in the settings table.
//!
//! The stored value under `password_hash` is `salt:hash` -- a hex-encoded
//! 16-byte salt, a colon, and the hex-encoded 32-byte Argon2id output of
//! the master password with that salt. The verifier proves possession of
//! the password without storing it.
//!
//! A second settings entry, `encryption_salt`, holds an independently
//! generated salt for the field-encryption key, so the two derivations
//! never share material.

use cardsafe_config::VaultConfig;
use cardsafe_core::CardsafeError;
use cardsafe_storage::{Store, queries::settings};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::kdf;

pub(crate) const PASSWORD_HASH_KEY: &str = "password_hash";
pub(crate) const ENCRYPTION_SALT_KEY: &str = "encryption_salt";

/// True iff first-run setup has stored a password verifier.
pub fn is_setup_complete(store: &Store) -> Result<bool, CardsafeError> {
    Ok(settings::get_setting(store, PASSWORD_HASH_KEY)?.is_some())
}

/// Check a candidate master password against the stored verifier.
///
/// Returns false when no verifier exists or the hash mismatches. The
/// comparison is a plain equality check over hex strings: constant-time
/// comparison buys nothing for a local, single-process verifier, though
/// it would be the first hardening step if this ever crossed a network.
pub fn check_master_password(
    store: &Store,
    passphrase: &SecretString,
    config: &VaultConfig,
) -> Result<bool, CardsafeError> {
    let Some(stored) = settings::get_setting(store, PASSWORD_HASH_KEY)? else {
        return Ok(false);
    };
    let Some((salt_hex, stored_hash)) = stored.split_once(':') else {
        return Err(CardsafeError::Vault(
            "corrupted password verifier -- expected salt:hash".to_string(),
        ));
    };
    let salt = decode_salt(salt_hex)?;
    let recomputed = kdf::derive_key(passphrase.expose_secret().as_bytes(), &salt, config)?;
    Ok(hex::encode(*recomputed) == stored_hash)
}

/// Store a fresh verifier for `passphrase`, replacing any prior entry.
pub(crate) fn store_verifier(
    store: &Store,
    passphrase: &SecretString,
    config: &VaultConfig,
) -> Result<(), CardsafeError> {
    let salt = kdf::generate_salt()?;
    let hash = kdf::derive_key(passphrase.expose_secret().as_bytes(), &salt, config)?;
    let stored = format!("{}:{}", hex::encode(salt), hex::encode(*hash));
    settings::set_setting(store, PASSWORD_HASH_KEY, &stored)?;
    info!("master password verifier stored");
    Ok(())
}

/// Generate and store a fresh encryption salt, replacing any prior entry.
pub(crate) fn store_encryption_salt(store: &Store) -> Result<[u8; 16], CardsafeError> {
    let salt = kdf::generate_salt()?;
    settings::set_setting(store, ENCRYPTION_SALT_KEY, &hex::encode(salt))?;
    Ok(salt)
}

/// Load the stored encryption salt.
pub(crate) fn load_encryption_salt(store: &Store) -> Result<[u8; 16], CardsafeError> {
    let Some(salt_hex) = settings::get_setting(store, ENCRYPTION_SALT_KEY)? else {
        return Err(CardsafeError::Vault(
            "missing encryption salt -- store was set up by an incompatible version".to_string(),
        ));
    };
    decode_salt(&salt_hex)
}

fn decode_salt(salt_hex: &str) -> Result<[u8; 16], CardsafeError> {
    let bytes = hex::decode(salt_hex)
        .map_err(|_| CardsafeError::Vault("corrupted salt -- not valid hex".to_string()))?;
    bytes
        .try_into()
        .map_err(|_| CardsafeError::Vault("corrupted salt (expected 16 bytes)".to_string()))
}
