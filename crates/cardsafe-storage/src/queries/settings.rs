// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings key/value operations.

use cardsafe_core::CardsafeError;
use rusqlite::params;

use crate::store::{Store, map_sql_err};

/// Get a settings value by key.
pub fn get_setting(store: &Store, key: &str) -> Result<Option<String>, CardsafeError> {
    let conn = store.connect()?;
    let mut stmt = conn
        .prepare("SELECT value FROM settings WHERE key = ?1")
        .map_err(map_sql_err)?;
    let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(map_sql_err(e)),
    }
}

/// Set a settings value, replacing any prior entry for the same key.
pub fn set_setting(store: &Store, key: &str, value: &str) -> Result<(), CardsafeError> {
    let conn = store.connect()?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )
    .map_err(map_sql_err)?;
    Ok(())
}
