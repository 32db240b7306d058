// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-protection layer for the Cardsafe vault.
//!
//! Derives an AES-256-GCM field key from the master password via Argon2id,
//! authenticates the user against a stored verifier, and provides the
//! encrypted card CRUD surface with display masking. The unlocked session
//! is an explicit [`Vault`] value holding the derived key -- there is no
//! ambient global state, and the field cipher is unreachable without one.
//!
//! The password verifier and the encryption key use two independently
//! generated salts, so exposure of one does not aid recovery of the other.

pub mod auth;
pub mod cards;
pub mod crypto;
pub mod field;
pub mod kdf;
pub mod prompt;
pub mod vault;

pub use auth::{check_master_password, is_setup_complete};
pub use cards::{mask_card_number, mask_pin};
pub use field::FieldOutcome;
pub use prompt::{get_master_password, get_master_password_with_confirm};
pub use vault::Vault;
