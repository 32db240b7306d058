// SPDX-FileCopyrightText: 2026 Cardsafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cardsafe - an encrypted local vault for bank card records.
//!
//! This is the binary entry point wiring config, storage, vault, and
//! transfer together. All card data lives in one SQLite file; sensitive
//! fields are AES-256-GCM encrypted under a key derived from the master
//! password.

use std::path::PathBuf;
use std::process::ExitCode;

use cardsafe_config::CardsafeConfig;
use cardsafe_core::{CardDraft, CardsafeError};
use cardsafe_storage::Store;
use cardsafe_vault::{Vault, get_master_password, get_master_password_with_confirm};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Cardsafe - an encrypted local vault for bank card records.
#[derive(Parser, Debug)]
#[command(name = "cardsafe", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Set up a new vault with a master password.
    Init,
    /// Show vault location, setup state, and card count.
    Status,
    /// Add a single card.
    Add(CardFields),
    /// Replace the fields of an existing card.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CardFields,
    },
    /// List all cards with sensitive fields masked.
    List,
    /// Show one card in full, decrypted.
    Show { id: i64 },
    /// Delete a card by id.
    Delete { id: i64 },
    /// Export all cards to an XLSX workbook (decrypted).
    ExportXlsx { path: PathBuf },
    /// Import cards from an XLSX workbook, best effort.
    ImportXlsx { path: PathBuf },
    /// Export all cards to a JSON document (decrypted).
    ExportJson { path: PathBuf },
}

/// Card fields supplied on the command line for `add` and `edit`.
#[derive(Args, Debug)]
struct CardFields {
    #[arg(long)]
    bank: String,
    #[arg(long)]
    branch: String,
    #[arg(long)]
    ifsc: String,
    #[arg(long)]
    account: String,
    #[arg(long)]
    atm: String,
    #[arg(long)]
    pin: String,
    #[arg(long)]
    valid_from: String,
    #[arg(long)]
    valid_until: String,
    #[arg(long)]
    cvv: String,
    #[arg(long, default_value = "Debit")]
    card_type: String,
    #[arg(long, default_value = "RuPay")]
    network: String,
    #[arg(long)]
    member: String,
}

impl CardFields {
    fn into_draft(self) -> CardDraft {
        CardDraft {
            bank_name: self.bank,
            branch_name: self.branch,
            ifsc_code: self.ifsc,
            account_number: self.account,
            atm_number: self.atm,
            pin: self.pin,
            validity_start: self.valid_from,
            validity_end: self.valid_until,
            cvv: self.cvv,
            card_type: self.card_type,
            card_network: self.network,
            family_member: self.member,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cardsafe_config::load_and_validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cardsafe: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cardsafe: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &CardsafeConfig) -> Result<(), CardsafeError> {
    let store = Store::open(&config.storage.database_path)?;

    match command {
        Commands::Init => {
            if cardsafe_vault::is_setup_complete(&store)? {
                return Err(CardsafeError::Vault(
                    "vault is already set up; refusing to replace the master password".to_string(),
                ));
            }
            let password = get_master_password_with_confirm()?;
            Vault::setup(store, &password, &config.vault)?;
            println!("Vault initialized at {}", config.storage.database_path);
        }
        Commands::Status => {
            let set_up = cardsafe_vault::is_setup_complete(&store)?;
            let count = cardsafe_storage::queries::cards::list_cards(&store)?.len();
            println!("Database:  {}", config.storage.database_path);
            println!("Set up:    {}", if set_up { "yes" } else { "no" });
            println!("Cards:     {count}");
        }
        Commands::Add(fields) => {
            let vault = unlock(store, config)?;
            let id = vault.add_card(&fields.into_draft())?;
            println!("Added card {id}.");
        }
        Commands::Edit { id, fields } => {
            let vault = unlock(store, config)?;
            if vault.update_card(id, &fields.into_draft())? {
                println!("Updated card {id}.");
            } else {
                return Err(CardsafeError::Vault(format!("no card with id {id}")));
            }
        }
        Commands::List => {
            let vault = unlock(store, config)?;
            let cards = vault.list_cards_masked()?;
            if cards.is_empty() {
                println!("No cards stored.");
                return Ok(());
            }
            for card in &cards {
                println!(
                    "{:>4}  {:<20} {:<19} {:<10} {:<10} {}",
                    card.id, card.bank_name, card.atm_number, card.card_type,
                    card.card_network, card.family_member
                );
            }
        }
        Commands::Show { id } => {
            let vault = unlock(store, config)?;
            let Some(card) = vault.get_card(id)? else {
                return Err(CardsafeError::Vault(format!("no card with id {id}")));
            };
            println!("Bank:            {}", card.bank_name);
            println!("Branch:          {}", card.branch_name);
            println!("IFSC:            {}", card.ifsc_code);
            println!("Account number:  {}", card.account_number);
            println!("ATM number:      {}", card.atm_number);
            println!("PIN:             {}", card.pin);
            println!("CVV:             {}", card.cvv);
            println!("Valid:           {} to {}", card.validity_start, card.validity_end);
            println!("Type:            {} ({})", card.card_type, card.card_network);
            println!("Family member:   {}", card.family_member);
            println!("Created:         {}", card.created_at);
            println!("Updated:         {}", card.updated_at);
        }
        Commands::Delete { id } => {
            let vault = unlock(store, config)?;
            if vault.delete_card(id)? {
                println!("Deleted card {id}.");
            } else {
                return Err(CardsafeError::Vault(format!("no card with id {id}")));
            }
        }
        Commands::ExportXlsx { path } => {
            let vault = unlock(store, config)?;
            let count = cardsafe_transfer::export_workbook(&vault, &path)?;
            println!("Exported {count} cards to {}", path.display());
        }
        Commands::ImportXlsx { path } => {
            let vault = unlock(store, config)?;
            let report = cardsafe_transfer::import_workbook(&vault, &path)?;
            println!(
                "Imported {} cards, skipped {}.",
                report.imported(),
                report.skipped()
            );
            for (row, reason) in report.rejections() {
                eprintln!("  row {row}: {reason}");
            }
        }
        Commands::ExportJson { path } => {
            let vault = unlock(store, config)?;
            let count = cardsafe_transfer::export_document(&vault, &path)?;
            println!("Exported {count} cards to {}", path.display());
        }
    }
    Ok(())
}

/// Prompt for the master password and unlock the vault.
fn unlock(store: Store, config: &CardsafeConfig) -> Result<Vault, CardsafeError> {
    let password = get_master_password()?;
    Vault::unlock(store, &password, &config.vault)
}
