// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Cardsafe vault.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `CARDSAFE_` prefix.

pub mod loader;
pub mod model;

use cardsafe_core::CardsafeError;

pub use loader::{load_config, load_config_from_str};
pub use model::{CardsafeConfig, StorageConfig, VaultConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// 1. Loads config from TOML files + env vars via Figment
/// 2. Runs post-deserialization validation on the KDF parameters
pub fn load_and_validate() -> Result<CardsafeConfig, CardsafeError> {
    let config = loader::load_config().map_err(|e| CardsafeError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it. Used by tests
/// and callers with an explicit config source.
pub fn load_and_validate_str(toml_content: &str) -> Result<CardsafeConfig, CardsafeError> {
    let config = loader::load_config_from_str(toml_content)
        .map_err(|e| CardsafeError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Reject KDF parameter combinations Argon2id itself would refuse.
fn validate(config: &CardsafeConfig) -> Result<(), CardsafeError> {
    let vault = &config.vault;
    if vault.kdf_iterations == 0 {
        return Err(CardsafeError::Config(
            "vault.kdf_iterations must be at least 1".to_string(),
        ));
    }
    if vault.kdf_parallelism == 0 {
        return Err(CardsafeError::Config(
            "vault.kdf_parallelism must be at least 1".to_string(),
        ));
    }
    // Argon2 requires memory_cost >= 8 * parallelism KiB.
    if vault.kdf_memory_cost < 8 * vault.kdf_parallelism {
        return Err(CardsafeError::Config(format!(
            "vault.kdf_memory_cost must be at least {} KiB for parallelism {}",
            8 * vault.kdf_parallelism,
            vault.kdf_parallelism
        )));
    }
    if config.storage.database_path.trim().is_empty() {
        return Err(CardsafeError::Config(
            "storage.database_path must not be empty".to_string(),
        ));
    }
    Ok(())
}
