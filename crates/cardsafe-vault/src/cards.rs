// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level encrypted card CRUD and display masking.
//!
//! The four sensitive fields (account_number, atm_number, pin, cvv) are
//! always sealed together per write, never partially. Masking is applied
//! to the decrypted value, never to ciphertext.

use cardsafe_core::{CardDraft, CardRecord, CardsafeError};
use cardsafe_storage::queries::cards;
use chrono::Utc;
use tracing::{debug, warn};

use crate::field::FieldOutcome;
use crate::vault::Vault;

impl Vault {
    /// Encrypt the sensitive fields of `draft` and insert a new record.
    /// Returns the assigned id.
    pub fn add_card(&self, draft: &CardDraft) -> Result<i64, CardsafeError> {
        let sealed = self.seal_draft(draft)?;
        let now = Utc::now().to_rfc3339();
        let id = cards::insert_card(self.store(), &sealed, &now, &now)?;
        debug!(card_id = id, "card added");
        Ok(id)
    }

    /// Get a card by id, decrypted and unmasked.
    pub fn get_card(&self, id: i64) -> Result<Option<CardRecord>, CardsafeError> {
        match cards::get_card(self.store(), id)? {
            Some(record) => Ok(Some(self.open_record(record))),
            None => Ok(None),
        }
    }

    /// Re-encrypt all four sensitive fields and update the record in
    /// place, refreshing `updated_at`. Returns false when the id is
    /// absent.
    pub fn update_card(&self, id: i64, draft: &CardDraft) -> Result<bool, CardsafeError> {
        let sealed = self.seal_draft(draft)?;
        let now = Utc::now().to_rfc3339();
        let affected = cards::update_card(self.store(), id, &sealed, &now)?;
        debug!(card_id = id, affected, "card updated");
        Ok(affected > 0)
    }

    /// Delete a card. Returns false when the id is absent.
    pub fn delete_card(&self, id: i64) -> Result<bool, CardsafeError> {
        let affected = cards::delete_card(self.store(), id)?;
        debug!(card_id = id, affected, "card deleted");
        Ok(affected > 0)
    }

    /// List all cards newest-first with sensitive fields masked for
    /// display.
    pub fn list_cards_masked(&self) -> Result<Vec<CardRecord>, CardsafeError> {
        let records = self.list_cards_unmasked()?;
        Ok(records
            .into_iter()
            .map(|mut record| {
                record.account_number = mask_card_number(&record.account_number);
                record.atm_number = mask_card_number(&record.atm_number);
                record.pin = mask_pin(&record.pin);
                record.cvv = mask_pin(&record.cvv);
                record
            })
            .collect())
    }

    /// List all cards newest-first, fully decrypted. Export use only.
    pub fn list_cards_unmasked(&self) -> Result<Vec<CardRecord>, CardsafeError> {
        let records = cards::list_cards(self.store())?;
        Ok(records
            .into_iter()
            .map(|record| self.open_record(record))
            .collect())
    }

    /// Seal the four sensitive fields; metadata passes through untouched.
    fn seal_draft(&self, draft: &CardDraft) -> Result<CardDraft, CardsafeError> {
        let mut sealed = draft.clone();
        sealed.account_number = self.seal_field(&draft.account_number)?;
        sealed.atm_number = self.seal_field(&draft.atm_number)?;
        sealed.pin = self.seal_field(&draft.pin)?;
        sealed.cvv = self.seal_field(&draft.cvv)?;
        Ok(sealed)
    }

    fn open_record(&self, mut record: CardRecord) -> CardRecord {
        let id = record.id;
        record.account_number = self.open_to_value(record.account_number, "account_number", id);
        record.atm_number = self.open_to_value(record.atm_number, "atm_number", id);
        record.pin = self.open_to_value(record.pin, "pin", id);
        record.cvv = self.open_to_value(record.cvv, "cvv", id);
        record
    }

    fn open_to_value(&self, stored: String, field: &str, id: i64) -> String {
        match self.open_field(&stored) {
            FieldOutcome::Decrypted(value) => value,
            FieldOutcome::LegacyPlaintext(value) => {
                warn!(card_id = id, field, "field stored as legacy plaintext");
                value
            }
            FieldOutcome::Undecryptable(value) => {
                warn!(
                    card_id = id,
                    field, "field could not be decrypted; returning stored value"
                );
                value
            }
        }
    }
}

/// Mask a card or account number for display.
///
/// 16 characters or longer shows the real first and last four; anything
/// shorter gets the fully generic placeholder.
pub fn mask_card_number(number: &str) -> String {
    if number.chars().count() >= 16 {
        let first: String = number.chars().take(4).collect();
        let last: String = number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{first} **** **** {last}")
    } else {
        "**** **** **** ****".to_string()
    }
}

/// Mask a PIN or CVV for display.
///
/// Length 3 masks to `***`, everything else to `**`. The coarse rule is
/// deliberate: it matches the legacy display behavior, including not
/// distinguishing 4-digit values.
pub fn mask_pin(value: &str) -> String {
    if value.chars().count() == 3 {
        "***".to_string()
    } else {
        "**".to_string()
    }
}
