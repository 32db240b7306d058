// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Card record types shared across storage, vault, and transfer crates.
//!
//! All fields are plain strings. Whether the four sensitive fields
//! (`account_number`, `atm_number`, `pin`, `cvv`) hold plaintext,
//! ciphertext, or masked display strings depends on which layer produced
//! the value -- the types themselves do not track it.

use serde::{Deserialize, Serialize};

/// Input fields for creating or updating a card record.
///
/// Everything the user supplies; ids and timestamps are assigned by the
/// credential store on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub bank_name: String,
    pub branch_name: String,
    pub ifsc_code: String,
    pub account_number: String,
    pub atm_number: String,
    pub pin: String,
    pub validity_start: String,
    pub validity_end: String,
    pub cvv: String,
    pub card_type: String,
    pub card_network: String,
    pub family_member: String,
}

/// A stored card record with its id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: i64,
    pub bank_name: String,
    pub branch_name: String,
    pub ifsc_code: String,
    pub account_number: String,
    pub atm_number: String,
    pub pin: String,
    pub validity_start: String,
    pub validity_end: String,
    pub cvv: String,
    pub card_type: String,
    pub card_network: String,
    pub family_member: String,
    /// RFC 3339 UTC timestamp, assigned on creation.
    pub created_at: String,
    /// RFC 3339 UTC timestamp, refreshed on every update.
    pub updated_at: String,
}

impl CardRecord {
    /// The user-editable portion of this record.
    pub fn draft(&self) -> CardDraft {
        CardDraft {
            bank_name: self.bank_name.clone(),
            branch_name: self.branch_name.clone(),
            ifsc_code: self.ifsc_code.clone(),
            account_number: self.account_number.clone(),
            atm_number: self.atm_number.clone(),
            pin: self.pin.clone(),
            validity_start: self.validity_start.clone(),
            validity_end: self.validity_end.clone(),
            cvv: self.cvv.clone(),
            card_type: self.card_type.clone(),
            card_network: self.card_network.clone(),
            family_member: self.family_member.clone(),
        }
    }
}
