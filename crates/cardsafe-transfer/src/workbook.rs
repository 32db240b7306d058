// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! XLSX export and best-effort import.
//!
//! The sheet layout is fixed: a "Bank Cards" sheet with one header row and
//! fifteen columns, plus a "Summary" sheet with the export date, the total
//! count, and a per-card-type breakdown. Import reads the same layout,
//! ignores the id/timestamp columns, and validates each data row
//! independently.

use calamine::{Data, Reader, open_workbook_auto};
use cardsafe_core::{CardDraft, CardsafeError};
use cardsafe_vault::Vault;
use chrono::{NaiveDate, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::path::Path;
use tracing::{debug, info};

use crate::report::{ImportReport, RejectReason, RowOutcome, RowResult};

/// Column headers of the "Bank Cards" sheet, in column order.
pub const HEADERS: [&str; 15] = [
    "ID",
    "Bank Name",
    "Branch Name",
    "IFSC Code",
    "Account Number",
    "ATM Number",
    "PIN",
    "Valid From",
    "Valid Until",
    "CVV",
    "Card Type",
    "Card Network",
    "Family Member",
    "Created At",
    "Updated At",
];

/// Export every card, decrypted, to an XLSX workbook at `path`.
/// Returns the number of cards written.
pub fn export_workbook(vault: &Vault, path: &Path) -> Result<usize, CardsafeError> {
    let cards = vault.list_cards_unmasked()?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Bank Cards").map_err(xlsx_err)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x366092))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for (i, card) in cards.iter().enumerate() {
        let row = (i + 1) as u32;
        let cells: [&str; 14] = [
            &card.bank_name,
            &card.branch_name,
            &card.ifsc_code,
            &card.account_number,
            &card.atm_number,
            &card.pin,
            &card.validity_start,
            &card.validity_end,
            &card.cvv,
            &card.card_type,
            &card.card_network,
            &card.family_member,
            &card.created_at,
            &card.updated_at,
        ];
        sheet.write(row, 0, card.id).map_err(xlsx_err)?;
        widths[0] = widths[0].max(card.id.to_string().len());
        for (j, value) in cells.iter().enumerate() {
            let col = (j + 1) as u16;
            sheet.write(row, col, *value).map_err(xlsx_err)?;
            widths[j + 1] = widths[j + 1].max(value.len());
        }
    }
    for (col, width) in widths.iter().enumerate() {
        let width = (width + 2).min(50) as f64;
        sheet
            .set_column_width(col as u16, width)
            .map_err(xlsx_err)?;
    }

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").map_err(xlsx_err)?;
    let title_format = Format::new().set_bold().set_font_size(14);
    summary
        .write_with_format(0, 0, "Bank Cards Export Summary", &title_format)
        .map_err(xlsx_err)?;
    summary.write(2, 0, "Export Date:").map_err(xlsx_err)?;
    summary
        .write(2, 1, Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .map_err(xlsx_err)?;
    summary.write(3, 0, "Total Cards:").map_err(xlsx_err)?;
    summary
        .write(3, 1, cards.len() as u32)
        .map_err(xlsx_err)?;
    summary.write(5, 0, "Card Types:").map_err(xlsx_err)?;

    // Per-type counts in first-seen order.
    let mut type_counts: Vec<(String, u32)> = Vec::new();
    for card in &cards {
        match type_counts.iter_mut().find(|(t, _)| *t == card.card_type) {
            Some((_, count)) => *count += 1,
            None => type_counts.push((card.card_type.clone(), 1)),
        }
    }
    for (i, (card_type, count)) in type_counts.iter().enumerate() {
        let row = (6 + i) as u32;
        summary
            .write(row, 0, format!("{card_type}:"))
            .map_err(xlsx_err)?;
        summary.write(row, 1, *count).map_err(xlsx_err)?;
    }

    workbook.save(path).map_err(xlsx_err)?;
    info!(count = cards.len(), path = %path.display(), "exported cards to workbook");
    Ok(cards.len())
}

/// Import cards from an XLSX workbook at `path`, best effort.
///
/// Reads the first sheet, skips the header row, validates each data row
/// independently, and stores the valid ones through the vault. A row that
/// fails validation is recorded and skipped, never aborting the run; only
/// an unreadable workbook is a hard error.
pub fn import_workbook(vault: &Vault, path: &Path) -> Result<ImportReport, CardsafeError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CardsafeError::Transfer(format!("failed to open workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CardsafeError::Transfer("workbook has no sheets".to_string()))?
        .map_err(|e| CardsafeError::Transfer(format!("failed to read sheet: {e}")))?;

    let mut report = ImportReport::default();
    for (i, row) in range.rows().enumerate().skip(1) {
        let sheet_row = (i + 1) as u32;
        let result = match parse_row(row) {
            Ok(draft) => match vault.add_card(&draft) {
                Ok(id) => RowResult::Imported { id },
                Err(e) => RowResult::Rejected {
                    reason: RejectReason::Other(e.to_string()),
                },
            },
            Err(reason) => RowResult::Rejected { reason },
        };
        if let RowResult::Rejected { reason } = &result {
            debug!(row = sheet_row, %reason, "import row rejected");
        }
        report.rows.push(RowOutcome {
            row: sheet_row,
            result,
        });
    }

    info!(
        imported = report.imported(),
        skipped = report.skipped(),
        path = %path.display(),
        "workbook import finished"
    );
    Ok(report)
}

/// Validate one data row into a draft. Column 0 (the exported id) is
/// ignored; ids are always reassigned on import.
fn parse_row(row: &[Data]) -> Result<CardDraft, RejectReason> {
    let bank_name = cell_text(row, 1);
    let branch_name = cell_text(row, 2);
    let ifsc_code = cell_text(row, 3);
    let account_number = cell_text(row, 4);
    let atm_number = cell_text(row, 5);
    let pin = cell_text(row, 6);
    let validity_start = cell_text(row, 7);
    let validity_end = cell_text(row, 8);
    let cvv = cell_text(row, 9);
    let card_type = cell_text_or(row, 10, "Debit");
    let card_network = cell_text_or(row, 11, "RuPay");
    let family_member = cell_text(row, 12);

    for (name, value) in [
        ("bank_name", &bank_name),
        ("branch_name", &branch_name),
        ("ifsc_code", &ifsc_code),
        ("account_number", &account_number),
        ("atm_number", &atm_number),
        ("pin", &pin),
        ("cvv", &cvv),
        ("validity_start", &validity_start),
        ("validity_end", &validity_end),
        ("family_member", &family_member),
    ] {
        if value.is_empty() {
            return Err(RejectReason::MissingField(name));
        }
    }

    // Numbers are often exported with grouping spaces; keep digits only.
    let account_number: String = account_number.chars().filter(char::is_ascii_digit).collect();
    let atm_number: String = atm_number.chars().filter(char::is_ascii_digit).collect();
    if atm_number.len() != 16 {
        return Err(RejectReason::BadAtmNumber {
            digits: atm_number.len(),
        });
    }

    for value in [&validity_start, &validity_end] {
        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            return Err(RejectReason::BadDate(value.clone()));
        }
    }

    Ok(CardDraft {
        bank_name,
        branch_name,
        ifsc_code,
        account_number,
        atm_number,
        pin,
        validity_start,
        validity_end,
        cvv,
        card_type,
        card_network,
        family_member,
    })
}

fn cell_text(row: &[Data], col: usize) -> String {
    let text = match row.get(col) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        // Spreadsheets coerce digit strings to numbers; keep integral
        // values free of a trailing ".0".
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(other) => other.to_string(),
    };
    text.trim().to_string()
}

fn cell_text_or(row: &[Data], col: usize, default: &str) -> String {
    let text = cell_text(row, col);
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> CardsafeError {
    CardsafeError::Transfer(format!("failed to write workbook: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsafe_config::VaultConfig;
    use cardsafe_storage::Store;
    use secrecy::SecretString;
    use tempfile::tempdir;

    fn test_config() -> VaultConfig {
        VaultConfig {
            kdf_memory_cost: 32768,
            kdf_iterations: 2,
            kdf_parallelism: 1,
        }
    }

    fn open_test_vault(dir: &std::path::Path, name: &str) -> Vault {
        let store = Store::open(dir.join(name)).unwrap();
        Vault::setup(store, &SecretString::from("test-master"), &test_config()).unwrap()
    }

    fn sample_draft(member: &str) -> CardDraft {
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
            family_member: member.into(),
        }
    }

    /// Build a workbook by hand with raw string rows (15 columns or fewer).
    fn write_sheet(path: &std::path::Path, rows: &[Vec<&str>]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write(0, col as u16, *header).unwrap();
        }
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                sheet.write((i + 1) as u32, j as u16, *value).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn export_then_import_roundtrips_cards() {
        let dir = tempdir().unwrap();
        let source = open_test_vault(dir.path(), "source.db");
        source.add_card(&sample_draft("Self")).unwrap();
        source.add_card(&sample_draft("Spouse")).unwrap();

        let path = dir.path().join("cards.xlsx");
        assert_eq!(export_workbook(&source, &path).unwrap(), 2);

        let target = open_test_vault(dir.path(), "target.db");
        let report = import_workbook(&target, &path).unwrap();
        assert_eq!(report.imported(), 2);
        assert_eq!(report.skipped(), 0);

        let cards = target.list_cards_unmasked().unwrap();
        assert_eq!(cards.len(), 2);
        let members: Vec<_> = cards.iter().map(|c| c.family_member.as_str()).collect();
        assert!(members.contains(&"Self"));
        assert!(members.contains(&"Spouse"));
        // Sensitive fields survive decrypt-export-import-encrypt intact.
        assert!(cards.iter().all(|c| c.pin == "8500"));
        assert!(cards.iter().all(|c| c.atm_number == "1234567890123456"));
    }

    #[test]
    fn bad_rows_are_skipped_without_aborting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.xlsx");
        let good = |member: &'static str| -> Vec<&'static str> {
            vec![
                "", "SBI", "Main", "SBIN0000001", "1234567890", "1234567890123456", "1111",
                "2024-01-01", "2029-01-01", "123", "Debit", "RuPay", member,
            ]
        };
        let mut rows = vec![
            good("A"),
            good("B"),
            good("C"),
            good("D"),
            good("E"),
            good("F"),
            good("G"),
        ];
        // Missing pin.
        rows.push(vec![
            "", "SBI", "Main", "SBIN0000001", "1234567890", "1234567890123456", "",
            "2024-01-01", "2029-01-01", "123", "Debit", "RuPay", "H",
        ]);
        // 15-digit ATM number.
        rows.push(vec![
            "", "SBI", "Main", "SBIN0000001", "1234567890", "123456789012345", "1111",
            "2024-01-01", "2029-01-01", "123", "Debit", "RuPay", "I",
        ]);
        // Bad date.
        rows.push(vec![
            "", "SBI", "Main", "SBIN0000001", "1234567890", "1234567890123456", "1111",
            "01/02/2024", "2029-01-01", "123", "Debit", "RuPay", "J",
        ]);
        write_sheet(&path, &rows);

        let vault = open_test_vault(dir.path(), "vault.db");
        let report = import_workbook(&vault, &path).unwrap();
        assert_eq!(report.imported(), 7);
        assert_eq!(report.skipped(), 3);

        let reasons: Vec<_> = report.rejections().map(|(_, r)| r.clone()).collect();
        assert!(reasons.contains(&RejectReason::MissingField("pin")));
        assert!(reasons.contains(&RejectReason::BadAtmNumber { digits: 15 }));
        assert!(reasons.contains(&RejectReason::BadDate("01/02/2024".into())));
        assert_eq!(vault.list_cards_unmasked().unwrap().len(), 7);
    }

    #[test]
    fn invalid_month_and_missing_bank_name_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.xlsx");
        // Well-formed date shape with an impossible month.
        let bad_month = vec![
            "", "SBI", "Main", "SBIN0000001", "1234567890", "1234567890123456", "1111",
            "2024-13-01", "2029-01-01", "123", "Debit", "RuPay", "K",
        ];
        let no_bank = vec![
            "", "", "Main", "SBIN0000001", "1234567890", "1234567890123456", "1111",
            "2024-01-01", "2029-01-01", "123", "Debit", "RuPay", "L",
        ];
        write_sheet(&path, &[bad_month, no_bank]);

        let vault = open_test_vault(dir.path(), "vault.db");
        let report = import_workbook(&vault, &path).unwrap();
        assert_eq!(report.imported(), 0);
        assert_eq!(report.skipped(), 2);

        let reasons: Vec<_> = report.rejections().map(|(_, r)| r.clone()).collect();
        assert!(reasons.contains(&RejectReason::BadDate("2024-13-01".into())));
        assert!(reasons.contains(&RejectReason::MissingField("bank_name")));
    }

    #[test]
    fn spaced_numbers_are_normalized_to_digits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spaced.xlsx");
        write_sheet(
            &path,
            &[vec![
                "", "SBI", "Main", "SBIN0000001", "1234 5678 90", "1234 5678 9012 3456", "1111",
                "2024-01-01", "2029-01-01", "123", "Debit", "RuPay", "Self",
            ]],
        );

        let vault = open_test_vault(dir.path(), "vault.db");
        let report = import_workbook(&vault, &path).unwrap();
        assert_eq!(report.imported(), 1);

        let card = &vault.list_cards_unmasked().unwrap()[0];
        assert_eq!(card.atm_number, "1234567890123456");
        assert_eq!(card.account_number, "1234567890");
    }

    #[test]
    fn empty_type_and_network_get_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.xlsx");
        write_sheet(
            &path,
            &[vec![
                "", "SBI", "Main", "SBIN0000001", "1234567890", "1234567890123456", "1111",
                "2024-01-01", "2029-01-01", "123", "", "", "Self",
            ]],
        );

        let vault = open_test_vault(dir.path(), "vault.db");
        let report = import_workbook(&vault, &path).unwrap();
        assert_eq!(report.imported(), 1);

        let card = &vault.list_cards_unmasked().unwrap()[0];
        assert_eq!(card.card_type, "Debit");
        assert_eq!(card.card_network, "RuPay");
    }

    #[test]
    fn unreadable_workbook_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let vault = open_test_vault(dir.path(), "vault.db");
        let result = import_workbook(&vault, &path);
        assert!(matches!(result, Err(CardsafeError::Transfer(_))));
    }

    #[test]
    fn export_of_empty_vault_writes_headers_only() {
        let dir = tempdir().unwrap();
        let vault = open_test_vault(dir.path(), "vault.db");
        let path = dir.path().join("empty.xlsx");
        assert_eq!(export_workbook(&vault, &path).unwrap(), 0);

        // Re-importing it yields nothing, not an error.
        let report = import_workbook(&vault, &path).unwrap();
        assert_eq!(report.imported(), 0);
        assert_eq!(report.skipped(), 0);
    }
}
