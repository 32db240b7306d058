// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Cardsafe vault.
//!
//! This crate provides the error taxonomy and the shared card record types
//! used throughout the Cardsafe workspace. It contains no cryptography and
//! no persistence; those live in `cardsafe-vault` and `cardsafe-storage`.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CardsafeError;
pub use types::{CardDraft, CardRecord};
