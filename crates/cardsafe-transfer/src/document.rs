// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON export document.

use cardsafe_core::{CardRecord, CardsafeError};
use cardsafe_vault::Vault;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Format version written into every export document.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// The top-level shape of a JSON export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    /// RFC 3339 UTC timestamp of the export.
    pub export_date: String,
    pub version: String,
    pub total_cards: usize,
    pub cards: Vec<CardRecord>,
}

/// Export every card, decrypted, as a pretty-printed JSON document at
/// `path`. Returns the number of cards written.
pub fn export_document(vault: &Vault, path: &Path) -> Result<usize, CardsafeError> {
    let cards = vault.list_cards_unmasked()?;
    let document = ExportDocument {
        export_date: Utc::now().to_rfc3339(),
        version: DOCUMENT_VERSION.to_string(),
        total_cards: cards.len(),
        cards,
    };

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| CardsafeError::Transfer(format!("failed to serialize export: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| CardsafeError::Transfer(format!("failed to write export file: {e}")))?;

    info!(count = document.total_cards, path = %path.display(), "exported cards to JSON");
    Ok(document.total_cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsafe_config::VaultConfig;
    use cardsafe_core::CardDraft;
    use cardsafe_storage::Store;
    use cardsafe_vault::Vault;
    use secrecy::SecretString;
    use tempfile::tempdir;

    fn test_config() -> VaultConfig {
        VaultConfig {
            kdf_memory_cost: 32768,
            kdf_iterations: 2,
            kdf_parallelism: 1,
        }
    }

    fn sample_draft() -> CardDraft {
        CardDraft {
            bank_name: "SBI".into(),
            branch_name: "Park Street".into(),
            ifsc_code: "SBIN0000001".into(),
            account_number: "12345678901234567890".into(),
            atm_number: "1234567890123456".into(),
            pin: "8500".into(),
            validity_start: "2024-01-01".into(),
            validity_end: "2029-01-01".into(),
            cvv: "123".into(),
            card_type: "Debit".into(),
            card_network: "RuPay".into(),
            family_member: "Self".into(),
        }
    }

    #[test]
    fn document_carries_decrypted_cards_and_metadata() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("json_test.db")).unwrap();
        let vault =
            Vault::setup(store, &SecretString::from("test-master"), &test_config()).unwrap();
        vault.add_card(&sample_draft()).unwrap();

        let path = dir.path().join("cards.json");
        assert_eq!(export_document(&vault, &path).unwrap(), 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        let document: ExportDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(document.version, DOCUMENT_VERSION);
        assert_eq!(document.total_cards, 1);
        assert_eq!(document.cards.len(), 1);
        // Plaintext in the export, not ciphertext.
        assert_eq!(document.cards[0].pin, "8500");
        assert!(!raw.contains("cs1:"));
        assert!(!document.export_date.is_empty());
    }

    #[test]
    fn empty_vault_exports_zero_cards() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("json_empty.db")).unwrap();
        let vault =
            Vault::setup(store, &SecretString::from("test-master"), &test_config()).unwrap();

        let path = dir.path().join("empty.json");
        assert_eq!(export_document(&vault, &path).unwrap(), 0);

        let document: ExportDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document.total_cards, 0);
        assert!(document.cards.is_empty());
    }
}
