// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unlocked session: an explicit value holding the field key.
//!
//! Every credential-store operation is a method on [`Vault`]; code that
//! has not set up or unlocked a session cannot reach the cipher. The
//! derived key lives only in memory and is zeroized on drop.

use cardsafe_config::VaultConfig;
use cardsafe_core::CardsafeError;
use cardsafe_storage::Store;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::auth;
use crate::field::{self, FieldOutcome};
use crate::kdf;

/// The unlocked vault, holding the derived field key in memory.
///
/// Debug output intentionally omits the key.
pub struct Vault {
    /// AES-256-GCM field key -- only in memory, never on disk.
    key: Zeroizing<[u8; 32]>,
    store: Store,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("key", &"[REDACTED]")
            .field("store", &self.store)
            .finish()
    }
}

impl Vault {
    /// First-run setup: store a verifier for `passphrase`, generate an
    /// independent encryption salt, and return the unlocked session.
    ///
    /// Replaces any prior verifier, so callers should gate this on
    /// [`auth::is_setup_complete`] unless a reset is intended.
    pub fn setup(
        store: Store,
        passphrase: &SecretString,
        config: &VaultConfig,
    ) -> Result<Self, CardsafeError> {
        auth::store_verifier(&store, passphrase, config)?;
        let enc_salt = auth::store_encryption_salt(&store)?;
        let key = kdf::derive_key(passphrase.expose_secret().as_bytes(), &enc_salt, config)?;
        info!("vault set up");
        Ok(Self { key, store })
    }

    /// Unlock an existing vault.
    ///
    /// Fails with [`CardsafeError::NotSetUp`] before first-run setup and
    /// [`CardsafeError::AuthenticationFailed`] on a password mismatch.
    pub fn unlock(
        store: Store,
        passphrase: &SecretString,
        config: &VaultConfig,
    ) -> Result<Self, CardsafeError> {
        if !auth::is_setup_complete(&store)? {
            return Err(CardsafeError::NotSetUp);
        }
        if !auth::check_master_password(&store, passphrase, config)? {
            return Err(CardsafeError::AuthenticationFailed);
        }
        let enc_salt = auth::load_encryption_salt(&store)?;
        let key = kdf::derive_key(passphrase.expose_secret().as_bytes(), &enc_salt, config)?;
        debug!("vault unlocked");
        Ok(Self { key, store })
    }

    /// Encrypt one field value for storage.
    pub fn seal_field(&self, plaintext: &str) -> Result<String, CardsafeError> {
        field::seal_field(&self.key, plaintext)
    }

    /// Decrypt one stored field value; see [`FieldOutcome`].
    pub fn open_field(&self, stored: &str) -> FieldOutcome {
        field::open_field(&self.key, stored)
    }

    /// The underlying record store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
