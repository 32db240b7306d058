// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk transfer of card records: XLSX export/import and JSON export.
//!
//! All transfer operations run over an unlocked [`cardsafe_vault::Vault`],
//! so exported files carry decrypted plaintext and imported rows are
//! re-encrypted on write. Import is best effort: one bad row never aborts
//! the run, and the per-row outcome is reported back to the caller.

pub mod document;
pub mod report;
pub mod workbook;

pub use document::{ExportDocument, export_document};
pub use report::{ImportReport, RejectReason, RowOutcome, RowResult};
pub use workbook::{export_workbook, import_workbook};
