// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./cardsafe.toml` > `~/.config/cardsafe/cardsafe.toml`
//! > `/etc/cardsafe/cardsafe.toml`, with environment variable overrides via the
//! `CARDSAFE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CardsafeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cardsafe/cardsafe.toml` (system-wide)
/// 3. `~/.config/cardsafe/cardsafe.toml` (user XDG config)
/// 4. `./cardsafe.toml` (local directory)
/// 5. `CARDSAFE_*` environment variables
pub fn load_config() -> Result<CardsafeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CardsafeConfig::default()))
        .merge(Toml::file("/etc/cardsafe/cardsafe.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cardsafe/cardsafe.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cardsafe.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CardsafeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CardsafeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CardsafeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CardsafeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that key names
/// containing underscores stay intact: `CARDSAFE_STORAGE_DATABASE_PATH`
/// must map to `storage.database_path`, not `storage.database.path`.
///
/// Only the two known sections pass the filter; other `CARDSAFE_*`
/// variables (notably `CARDSAFE_MASTER_PASSWORD`) are not config keys.
fn env_provider() -> Env {
    Env::prefixed("CARDSAFE_").filter_map(|key| {
        let key = key.as_str();
        if let Some(rest) = key.strip_prefix("storage_") {
            Some(format!("storage.{rest}").into())
        } else if let Some(rest) = key.strip_prefix("vault_") {
            Some(format!("vault.{rest}").into())
        } else {
            None
        }
    })
}
