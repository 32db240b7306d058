// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Cardsafe vault.
//!
//! Pure CRUD over the `settings` and `bank_cards` tables with embedded
//! migrations. This crate has no knowledge of encryption: sensitive
//! columns are opaque strings to it. Each logical operation opens its own
//! short-lived connection (open, execute, commit, release) -- there are no
//! cross-call transactions and no pooling.

pub mod migrations;
pub mod queries;
pub mod store;

pub use store::Store;
