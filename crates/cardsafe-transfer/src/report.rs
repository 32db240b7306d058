// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-row import outcomes.
//!
//! Replaces a bare imported/skipped counter pair: every data row gets an
//! entry saying what happened to it, so a caller can tell the user which
//! spreadsheet rows were rejected and why.

use std::fmt;

/// Outcome of one import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// One entry per data row, in sheet order.
    pub rows: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.result, RowResult::Imported { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.rows.len() - self.imported()
    }

    /// The rejected rows only, for error reporting.
    pub fn rejections(&self) -> impl Iterator<Item = (u32, &RejectReason)> {
        self.rows.iter().filter_map(|r| match &r.result {
            RowResult::Rejected { reason } => Some((r.row, reason)),
            RowResult::Imported { .. } => None,
        })
    }
}

/// What happened to a single spreadsheet row.
#[derive(Debug)]
pub struct RowOutcome {
    /// 1-based sheet row number (data starts at row 2).
    pub row: u32,
    pub result: RowResult,
}

#[derive(Debug)]
pub enum RowResult {
    /// The row validated and was stored under this id.
    Imported { id: i64 },
    Rejected { reason: RejectReason },
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A required field was empty after trimming.
    MissingField(&'static str),
    /// The ATM number did not reduce to exactly 16 digits.
    BadAtmNumber { digits: usize },
    /// A validity date was not in `YYYY-MM-DD` form.
    BadDate(String),
    /// The store rejected the row.
    Other(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingField(field) => write!(f, "missing required field `{field}`"),
            RejectReason::BadAtmNumber { digits } => {
                write!(f, "ATM number has {digits} digits, expected 16")
            }
            RejectReason::BadDate(value) => {
                write!(f, "invalid date `{value}`, expected YYYY-MM-DD")
            }
            RejectReason::Other(message) => write!(f, "{message}"),
        }
    }
}
