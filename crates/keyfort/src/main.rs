// SPDX-FileCopyrightText: 2026 Keyfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyfort -- a server-blind encrypted secrets vault.
//!
//! Binary entry point: `serve` runs the sync server; the remaining
//! subcommands are thin client operations that read the security token,
//! derive keys, and talk to the server.

use clap::{Parser, Subcommand};

mod commands;
mod serve;

/// Keyfort -- a server-blind encrypted secrets vault.
#[derive(Parser, Debug)]
#[command(name = "keyfort", version, about, long_about = None)]
struct Cli {
    /// Override the server URL from configuration.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Override the username from configuration.
    #[arg(long, global = true)]
    username: Option<String>,

    /// Override the security-token path from configuration.
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the vault sync server.
    Serve,
    /// Register this token's fingerprint with the server.
    Register,
    /// List entry names in the vault.
    Ls,
    /// Print one entry.
    Get {
        /// Entry name (case-sensitive).
        name: String,
    },
    /// Add or replace an entry, then sync.
    Add {
        /// Entry name (case-sensitive).
        name: String,
        #[command(subcommand)]
        entry: commands::EntryArgs,
    },
    /// Remove an entry, then sync.
    Rm {
        /// Entry name (case-sensitive).
        name: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match keyfort_config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("keyfort: {e}");
            std::process::exit(1);
        }
    };

    // CLI flags override configuration.
    if let Some(server) = cli.server {
        config.client.server_url = server;
    }
    if let Some(username) = cli.username {
        config.client.username = Some(username);
    }
    if let Some(token) = cli.token {
        config.client.token_path = Some(token);
    }

    init_tracing(&config.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(&config).await,
        Commands::Register => commands::register(&config).await,
        Commands::Ls => commands::ls(&config).await,
        Commands::Get { name } => commands::get(&config, &name).await,
        Commands::Add { name, entry } => commands::add(&config, &name, entry).await,
        Commands::Rm { name } => commands::rm(&config, &name).await,
    };

    if let Err(e) = result {
        eprintln!("keyfort: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// keyfort crates and `warn` to everything else.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new("warn");
        for target in [
            "keyfort",
            "keyfort_client",
            "keyfort_crypto",
            "keyfort_server",
            "keyfort_storage",
        ] {
            if let Ok(directive) = format!("{target}={log_level}").parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
