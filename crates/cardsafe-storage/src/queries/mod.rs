// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query functions over the two tables.

pub mod cards;
pub mod settings;
