//! GitVault — mirror a GitHub account's repositories to local disk.
//!
//! # Usage
//!
//! ```text
//! gitvault sync [ACCOUNT] [--mirror-root <dir>] [--inventory <file>]
//!               [--archive <file>] [--api-url <url>]
//! gitvault list [ACCOUNT] [--json] [--api-url <url>]
//! ```
//!
//! The account falls back to `GITHUB_USERNAME`. An optional `GITHUB_TOKEN`
//! widens the listing scope from public-only to everything the token can
//! see; both variables are read here, at the CLI boundary, never inside the
//! pipeline.

mod commands;

use std::env;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, sync::SyncArgs};
use gitvault_core::{AccountName, ConfigError, Credential};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gitvault",
    version,
    about = "Mirror, inventory, and archive every repository of a GitHub account",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full mirror pipeline: catalog, inventory, clone, pull, fetch,
    /// archive.
    Sync(SyncArgs),

    /// Fetch and print the repository catalog without touching local mirrors.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Configuration resolution — the only place ambient environment is read
// ---------------------------------------------------------------------------

/// Resolve the account from the CLI argument or `GITHUB_USERNAME`.
pub(crate) fn resolve_account(arg: Option<String>) -> Result<AccountName, ConfigError> {
    arg.or_else(|| env::var("GITHUB_USERNAME").ok())
        .filter(|s| !s.is_empty())
        .map(AccountName::from)
        .ok_or(ConfigError::MissingAccount)
}

/// Read the optional listing credential from `GITHUB_TOKEN`.
pub(crate) fn resolve_credential() -> Option<Credential> {
    env::var("GITHUB_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(Credential::new)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Stage progress from the pipeline arrives as `info` log lines; show
    // them by default, let RUST_LOG override.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}
