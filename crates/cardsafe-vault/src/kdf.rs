// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from the master password.
//!
//! Derives a 32-byte output using Argon2id (Algorithm::Argon2id,
//! Version::V0x13) with parameters from [`cardsafe_config::VaultConfig`].
//! The same function serves both uses in this crate: hashing the password
//! for the stored verifier and deriving the field-encryption key. The two
//! uses never share a salt.

use cardsafe_config::VaultConfig;
use cardsafe_core::CardsafeError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Derive 32 bytes from a passphrase using Argon2id.
///
/// The output is wrapped in [`Zeroizing`] for automatic memory zeroing on
/// drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; 16],
    config: &VaultConfig,
) -> Result<Zeroizing<[u8; 32]>, CardsafeError> {
    let params = argon2::Params::new(
        config.kdf_memory_cost,
        config.kdf_iterations,
        config.kdf_parallelism,
        Some(32),
    )
    .map_err(|e| CardsafeError::Vault(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(passphrase, salt, output.as_mut())
        .map_err(|e| CardsafeError::Vault(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; 16], CardsafeError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; 16];
    rng.fill(&mut salt)
        .map_err(|_| CardsafeError::Vault("failed to generate random salt".to_string()))?;
    Ok(salt)
}
