// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Cardsafe vault.

use thiserror::Error;

/// The primary error type used across all Cardsafe crates.
#[derive(Debug, Error)]
pub enum CardsafeError {
    /// Configuration errors (invalid TOML, unknown keys, bad KDF parameters).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An operation requiring a master password was attempted before
    /// first-run setup stored a password verifier.
    #[error("vault is not set up -- no master password has been stored")]
    NotSetUp,

    /// The supplied master password does not match the stored verifier.
    #[error("authentication failed -- master password mismatch")]
    AuthenticationFailed,

    /// Key derivation or field encryption errors.
    #[error("vault error: {0}")]
    Vault(String),

    /// Bulk import/export errors (unreadable workbook, write failure).
    /// Row-level import problems are not errors; they are reported per
    /// row in the import report.
    #[error("transfer error: {0}")]
    Transfer(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
