//! `gitvault list` — print the repository catalog without syncing.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use gitvault_core::{config, MirrorConfig, RepositorySet};
use gitvault_sync::catalog;

/// Arguments for `gitvault list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Account to list (falls back to `GITHUB_USERNAME`).
    pub account: Option<String>,

    /// Base URL of the listing API.
    #[arg(long, default_value = config::DEFAULT_API_BASE)]
    pub api_url: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let account = crate::resolve_account(self.account)?;
        let mut config = MirrorConfig::new(account, crate::resolve_credential());
        config.api_base = self.api_url;

        let repos = catalog::fetch(&config)
            .with_context(|| format!("failed to list repositories for '{}'", config.account))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(repos.records())?);
            return Ok(());
        }

        if repos.is_empty() {
            println!(
                "No repositories visible for '{}' (scope: {}).",
                config.account, config.scope,
            );
            return Ok(());
        }

        print_table(&repos);
        println!(
            "{} repositories (scope: {})",
            repos.len().to_string().bold(),
            config.scope,
        );
        Ok(())
    }
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "Repository")]
    name: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
    #[tabled(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn print_table(repos: &RepositorySet) {
    let rows: Vec<RepoRow> = repos
        .iter()
        .map(|repo| RepoRow {
            name: repo.full_name.clone(),
            visibility: if repo.private { "private" } else { "public" }.to_string(),
            updated: repo
                .updated_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            description: repo.description.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
