// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store handle: path ownership, schema setup, per-call connections.

use std::path::{Path, PathBuf};

use cardsafe_core::CardsafeError;
use rusqlite::Connection;
use tracing::debug;

/// Handle to the backing SQLite file.
///
/// `open` runs migrations once; afterwards every query function opens a
/// fresh connection, executes, and releases it. The handle itself is just
/// a path and is cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open (creating if absent) the database at `path` and bring the
    /// schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CardsafeError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CardsafeError::Storage {
                source: Box::new(e),
            })?;
        }
        let mut conn = Connection::open(&path).map_err(map_sql_err)?;
        crate::migrations::run_migrations(&mut conn)?;
        debug!(path = %path.display(), "store opened");
        Ok(Self { path })
    }

    /// Open a fresh connection for a single operation.
    pub(crate) fn connect(&self) -> Result<Connection, CardsafeError> {
        Connection::open(&self.path).map_err(map_sql_err)
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Convert rusqlite errors to `CardsafeError::Storage`.
pub(crate) fn map_sql_err(e: rusqlite::Error) -> CardsafeError {
    CardsafeError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.db");
        let store = Store::open(&path).unwrap();
        assert!(path.exists());

        // Schema is queryable immediately.
        let conn = store.connect().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM bank_cards", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn open_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.db");
        Store::open(&path).unwrap();
        // Second open re-runs migrations as a no-op.
        Store::open(&path).unwrap();
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cards.db");
        Store::open(&path).unwrap();
        assert!(path.exists());
    }
}
