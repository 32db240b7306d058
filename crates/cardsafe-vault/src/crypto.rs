// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG; nonce reuse would be catastrophic for GCM security.
//!
//! Wire format: `[ nonce (12 bytes) | ciphertext + tag (16 bytes) ]`.

use cardsafe_core::CardsafeError;
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

/// Length of the GCM nonce prepended to every sealed value.
pub const NONCE_LEN: usize = 12;

/// Encrypt plaintext with AES-256-GCM, prepending a random 96-bit nonce.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, CardsafeError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| CardsafeError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| CardsafeError::Vault("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CardsafeError::Vault("AES-256-GCM encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + in_out.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&in_out);
    Ok(out)
}

/// Decrypt wire-format bytes (nonce || ciphertext+tag).
///
/// Fails closed on a wrong key, tampered data, or a truncated buffer.
pub fn open(key: &[u8; 32], data: &[u8]) -> Result<Vec<u8>, CardsafeError> {
    if data.len() < NONCE_LEN {
        return Err(CardsafeError::Vault(
            "ciphertext too short to contain a nonce".to_string(),
        ));
    }
    let (nonce_bytes, ct) = data.split_at(NONCE_LEN);
    let nonce_bytes: [u8; NONCE_LEN] = nonce_bytes
        .try_into()
        .map_err(|_| CardsafeError::Vault("corrupted nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| CardsafeError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let mut in_out = ct.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            CardsafeError::Vault(
                "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
            )
        })?;

    Ok(plaintext.to_vec())
}
