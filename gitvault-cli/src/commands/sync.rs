//! `gitvault sync` — run the full mirror pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use gitvault_core::{config, MirrorConfig};
use gitvault_sync::{pipeline, RunReport, RunStatus, SystemGit};

/// Arguments for `gitvault sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Account whose repositories to mirror (falls back to `GITHUB_USERNAME`).
    pub account: Option<String>,

    /// Directory that receives one mirror directory per repository.
    #[arg(long, default_value = "repos")]
    pub mirror_root: PathBuf,

    /// CSV inventory output path, overwritten each run.
    #[arg(long, default_value = "repos.csv")]
    pub inventory: PathBuf,

    /// Archive output path (gzip-compressed tar), overwritten each run.
    #[arg(long, default_value = "repos.tar.gz")]
    pub archive: PathBuf,

    /// Base URL of the listing API.
    #[arg(long, default_value = config::DEFAULT_API_BASE)]
    pub api_url: String,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let account = crate::resolve_account(self.account)?;
        let mut config = MirrorConfig::new(account, crate::resolve_credential());
        config.api_base = self.api_url;
        config.mirror_root = self.mirror_root;
        config.inventory_path = self.inventory;
        config.archive_path = self.archive;

        let report = pipeline::run(&config, &SystemGit)
            .with_context(|| format!("mirror run failed for '{}'", config.account))?;

        print_report(&config, &report);
        Ok(())
    }
}

fn print_report(config: &MirrorConfig, report: &RunReport) {
    match report.status {
        RunStatus::Complete => println!(
            "{} mirrored {} repositories for '{}'",
            "✓".green(),
            report.total,
            config.account,
        ),
        RunStatus::Partial => println!(
            "{} mirrored {} repositories for '{}' with failures",
            "!".yellow(),
            report.total,
            config.account,
        ),
    }
    println!(
        "  {} cloned, {} already present, {} clone failures",
        report.cloned, report.existing, report.clone_failures,
    );
    if report.pull_failures + report.fetch_failures > 0 {
        println!(
            "  {} pull failures, {} fetch failures",
            report.pull_failures, report.fetch_failures,
        );
    }
    println!("  inventory: {}", config.inventory_path.display());
    println!(
        "  archive: {} ({} entries)",
        config.archive_path.display(),
        report.archived_entries,
    );
}
