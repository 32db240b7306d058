// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run once when a [`crate::Store`] is
//! opened.

use cardsafe_core::CardsafeError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table, so re-running on an up-to-date database is a no-op.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), CardsafeError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| CardsafeError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
