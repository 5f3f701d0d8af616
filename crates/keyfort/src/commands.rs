// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin client subcommands.
//!
//! Every mutating command follows the sync protocol's only shape:
//! pull -> mutate in memory -> push. Nothing here prompts or renders
//! beyond plain stdout lines; errors bubble up to main for the exit code.

use std::path::Path;

use clap::Subcommand;
use keyfort_client::VaultClient;
use keyfort_config::KeyfortConfig;
use keyfort_core::{KeyfortError, VaultEntry};
use keyfort_crypto::{read_master_secret, CryptoEngine};

/// Entry payload for `keyfort add`.
#[derive(Subcommand, Debug)]
pub enum EntryArgs {
    /// Username/password login.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// API key pair.
    ApiKey {
        #[arg(long)]
        key: String,
        #[arg(long)]
        secret: String,
    },
    /// Payment card.
    Card {
        #[arg(long)]
        holder: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        cvv: String,
        #[arg(long)]
        pin: String,
    },
}

impl From<EntryArgs> for VaultEntry {
    fn from(args: EntryArgs) -> Self {
        match args {
            EntryArgs::Login { username, password } => VaultEntry::Login { username, password },
            EntryArgs::ApiKey { key, secret } => VaultEntry::ApiKey { key, secret },
            EntryArgs::Card {
                holder,
                number,
                expiry,
                cvv,
                pin,
            } => VaultEntry::Card {
                holder,
                number,
                expiry,
                cvv,
                pin,
            },
        }
    }
}

/// Build a client from configuration: read the token, derive keys.
///
/// The token is read here, once per invocation, and dropped with the
/// engine at the end of the command.
fn client(config: &KeyfortConfig) -> Result<VaultClient, KeyfortError> {
    let username = config.client.username.clone().ok_or_else(|| {
        KeyfortError::Config("no username configured (set [client] username or --username)".into())
    })?;
    let token_path = config.client.token_path.clone().ok_or_else(|| {
        KeyfortError::Config("no token path configured (set [client] token_path or --token)".into())
    })?;

    let master_secret = read_master_secret(Path::new(&token_path))?;
    let engine = CryptoEngine::new(&master_secret)?;
    VaultClient::new(&config.client.server_url, &username, engine)
}

/// `keyfort register`
pub async fn register(config: &KeyfortConfig) -> Result<(), KeyfortError> {
    let message = client(config)?.register().await?;
    println!("{message}");
    Ok(())
}

/// `keyfort ls`
pub async fn ls(config: &KeyfortConfig) -> Result<(), KeyfortError> {
    let vault = client(config)?.pull().await?;
    if vault.is_empty() {
        println!("vault is empty");
        return Ok(());
    }
    for (name, entry) in &vault {
        println!("{name} ({})", kind_of(entry));
    }
    Ok(())
}

/// `keyfort get <name>`
pub async fn get(config: &KeyfortConfig, name: &str) -> Result<(), KeyfortError> {
    let vault = client(config)?.pull().await?;
    match vault.get(name) {
        Some(entry) => print_entry(name, entry),
        None => println!("no entry named '{name}'"),
    }
    Ok(())
}

/// `keyfort add <name> <kind> ...`
pub async fn add(
    config: &KeyfortConfig,
    name: &str,
    entry: EntryArgs,
) -> Result<(), KeyfortError> {
    let client = client(config)?;
    let mut vault = client.pull().await?;
    vault.insert(name.to_string(), entry.into());
    let bytes = client.push(&vault).await?;
    println!("added '{name}' ({bytes} bytes synced)");
    Ok(())
}

/// `keyfort rm <name>`
pub async fn rm(config: &KeyfortConfig, name: &str) -> Result<(), KeyfortError> {
    let client = client(config)?;
    let mut vault = client.pull().await?;
    if vault.remove(name).is_none() {
        println!("no entry named '{name}'");
        return Ok(());
    }
    let bytes = client.push(&vault).await?;
    println!("removed '{name}' ({bytes} bytes synced)");
    Ok(())
}

fn kind_of(entry: &VaultEntry) -> &'static str {
    match entry {
        VaultEntry::Login { .. } => "login",
        VaultEntry::ApiKey { .. } => "api_key",
        VaultEntry::Card { .. } => "card",
    }
}

fn print_entry(name: &str, entry: &VaultEntry) {
    println!("{name} ({})", kind_of(entry));
    match entry {
        VaultEntry::Login { username, password } => {
            println!("  username: {username}");
            println!("  password: {password}");
        }
        VaultEntry::ApiKey { key, secret } => {
            println!("  key:    {key}");
            println!("  secret: {secret}");
        }
        VaultEntry::Card {
            holder,
            number,
            expiry,
            cvv,
            pin,
        } => {
            println!("  holder: {holder}");
            println!("  number: {number}");
            println!("  expiry: {expiry}");
            println!("  cvv:    {cvv}");
            println!("  pin:    {pin}");
        }
    }
}
