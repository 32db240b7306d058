// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Card row CRUD operations.
//!
//! The sensitive columns are opaque strings at this layer; the vault crate
//! decides what goes into them.

use cardsafe_core::{CardDraft, CardRecord, CardsafeError};
use rusqlite::{Row, params};

use crate::store::{Store, map_sql_err};

const CARD_COLUMNS: &str = "id, bank_name, branch_name, ifsc_code, account_number, atm_number, \
     pin, validity_start, validity_end, cvv, card_type, card_network, \
     family_member, created_at, updated_at";

/// Insert a new card row and return its assigned id.
pub fn insert_card(
    store: &Store,
    draft: &CardDraft,
    created_at: &str,
    updated_at: &str,
) -> Result<i64, CardsafeError> {
    let conn = store.connect()?;
    conn.execute(
        "INSERT INTO bank_cards
         (bank_name, branch_name, ifsc_code, account_number, atm_number, pin,
          validity_start, validity_end, cvv, card_type, card_network,
          family_member, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            draft.bank_name,
            draft.branch_name,
            draft.ifsc_code,
            draft.account_number,
            draft.atm_number,
            draft.pin,
            draft.validity_start,
            draft.validity_end,
            draft.cvv,
            draft.card_type,
            draft.card_network,
            draft.family_member,
            created_at,
            updated_at,
        ],
    )
    .map_err(map_sql_err)?;
    Ok(conn.last_insert_rowid())
}

/// Get a card row by id.
pub fn get_card(store: &Store, id: i64) -> Result<Option<CardRecord>, CardsafeError> {
    let conn = store.connect()?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM bank_cards WHERE id = ?1"
        ))
        .map_err(map_sql_err)?;
    let result = stmt.query_row(params![id], record_from_row);
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(map_sql_err(e)),
    }
}

/// List all card rows, newest first.
///
/// `id DESC` breaks ties between rows created within the same instant.
pub fn list_cards(store: &Store) -> Result<Vec<CardRecord>, CardsafeError> {
    let conn = store.connect()?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM bank_cards ORDER BY created_at DESC, id DESC"
        ))
        .map_err(map_sql_err)?;
    let rows = stmt.query_map([], record_from_row).map_err(map_sql_err)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row.map_err(map_sql_err)?);
    }
    Ok(records)
}

/// Update a card row in place, returning the number of rows affected
/// (0 when the id is absent).
pub fn update_card(
    store: &Store,
    id: i64,
    draft: &CardDraft,
    updated_at: &str,
) -> Result<usize, CardsafeError> {
    let conn = store.connect()?;
    conn.execute(
        "UPDATE bank_cards
         SET bank_name = ?1, branch_name = ?2, ifsc_code = ?3, account_number = ?4,
             atm_number = ?5, pin = ?6, validity_start = ?7, validity_end = ?8,
             cvv = ?9, card_type = ?10, card_network = ?11, family_member = ?12,
             updated_at = ?13
         WHERE id = ?14",
        params![
            draft.bank_name,
            draft.branch_name,
            draft.ifsc_code,
            draft.account_number,
            draft.atm_number,
            draft.pin,
            draft.validity_start,
            draft.validity_end,
            draft.cvv,
            draft.card_type,
            draft.card_network,
            draft.family_member,
            updated_at,
            id,
        ],
    )
    .map_err(map_sql_err)
}

/// Delete a card row, returning the number of rows affected (0 when absent).
pub fn delete_card(store: &Store, id: i64) -> Result<usize, CardsafeError> {
    let conn = store.connect()?;
    conn.execute("DELETE FROM bank_cards WHERE id = ?1", params![id])
        .map_err(map_sql_err)
}

fn record_from_row(row: &Row<'_>) -> Result<CardRecord, rusqlite::Error> {
    Ok(CardRecord {
        id: row.get(0)?,
        bank_name: row.get(1)?,
        branch_name: row.get(2)?,
        ifsc_code: row.get(3)?,
        account_number: row.get(4)?,
        atm_number: row.get(5)?,
        pin: row.get(6)?,
        validity_start: row.get(7)?,
        validity_end: row.get(8)?,
        cvv: row.get(9)?,
        card_type: row.get(10)?,
        card_network: row.get(11)?,
        family_member: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}
