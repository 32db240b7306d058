// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-password acquisition via TTY prompt or CARDSAFE_MASTER_PASSWORD environment variable.

use cardsafe_core::CardsafeError;
use secrecy::SecretString;

/// The environment variable name for providing the master password.
pub const MASTER_PASSWORD_ENV_VAR: &str = "CARDSAFE_MASTER_PASSWORD";

/// Get the master password from environment variable or interactive TTY prompt.
///
/// Priority:
/// 1. `CARDSAFE_MASTER_PASSWORD` environment variable (for scripts/automation)
/// 2. Interactive TTY prompt via `rpassword` (for human operators)
///
/// Returns an error if neither source is available.
pub fn get_master_password() -> Result<SecretString, CardsafeError> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !stdin_is_tty() {
        return Err(no_password_source());
    }
    non_empty(read_tty("Master password")?)
}

/// Get the master password with a confirmation prompt (for first-run setup).
///
/// Prompts twice and verifies the passwords match. The env var needs no
/// confirmation and takes priority as above.
pub fn get_master_password_with_confirm() -> Result<SecretString, CardsafeError> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !stdin_is_tty() {
        return Err(no_password_source());
    }
    let first = read_tty("New master password")?;
    let second = read_tty("Confirm master password")?;
    if first != second {
        return Err(CardsafeError::Vault("passwords do not match".to_string()));
    }
    non_empty(first)
}

fn password_from_env() -> Option<SecretString> {
    std::env::var(MASTER_PASSWORD_ENV_VAR)
        .ok()
        .filter(|password| !password.is_empty())
        .map(SecretString::from)
}

fn stdin_is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn read_tty(label: &str) -> Result<String, CardsafeError> {
    eprint!("{label}: ");
    rpassword::read_password()
        .map_err(|e| CardsafeError::Vault(format!("failed to read password: {e}")))
}

fn non_empty(password: String) -> Result<SecretString, CardsafeError> {
    if password.is_empty() {
        return Err(CardsafeError::Vault("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(password))
}

fn no_password_source() -> CardsafeError {
    CardsafeError::Vault(
        "No password provided. Set CARDSAFE_MASTER_PASSWORD environment variable or run interactively."
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that mutate the shared process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env_var<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: test-only env mutation, serialized by ENV_LOCK.
        match value {
            Some(v) => unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, v) },
            None => unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) },
        }
        let result = f();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };
        result
    }

    #[test]
    fn get_password_from_env_var() {
        let result = with_env_var(Some("test-password"), get_master_password);
        assert!(result.is_ok());
    }

    #[test]
    fn get_password_with_confirm_from_env_var() {
        let result = with_env_var(Some("test-password"), get_master_password_with_confirm);
        assert!(result.is_ok());
    }

    #[test]
    fn empty_env_var_is_rejected() {
        // In CI/test, stdin is not a terminal, so this must fail rather
        // than fall back to an empty password.
        let result = with_env_var(Some(""), get_master_password);
        assert!(result.is_err());
    }

    #[test]
    fn unset_env_var_without_tty_is_an_error() {
        let result = with_env_var(None, get_master_password);
        assert!(result.is_err());
    }
}
