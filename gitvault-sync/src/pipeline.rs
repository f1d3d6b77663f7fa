//! Pipeline driver — one sequential mirror run.
//!
//! Stage order: catalog fetch → inventory export → clone sweep → pull sweep →
//! fetch-all sweep → archive build. Execution is strictly sequential; every
//! external call blocks and the next unit of work starts only after the
//! current one finishes or fails.
//!
//! Per-repository failures are isolated by the stage that owns them and only
//! surface as counts in the [`RunReport`]. The driver escalates to an error
//! for exactly the fatal cases: catalog fetch, inventory export, mirror-root
//! creation, and archive build.

use gitvault_core::{MirrorConfig, RepositorySet};

use crate::branches::{self, BranchOutcome};
use crate::catalog;
use crate::error::PipelineError;
use crate::git::GitTransport;
use crate::store::{self, CloneResult};
use crate::{archive, inventory};

/// Aggregate outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub cloned: usize,
    pub existing: usize,
    pub clone_failures: usize,
    pub pull_failures: usize,
    pub fetch_failures: usize,
    pub archived_entries: usize,
    pub status: RunStatus,
}

/// Whether every per-repository operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    Partial,
}

/// Run the full pipeline for `config`.
pub fn run(config: &MirrorConfig, git: &dyn GitTransport) -> Result<RunReport, PipelineError> {
    tracing::info!(
        "fetching repository catalog for {} (scope: {})",
        config.account,
        config.scope,
    );
    let repos = catalog::fetch(config)?;
    tracing::info!("catalog complete: {} repositories", repos.len());

    run_with_catalog(config, &repos, git)
}

/// Drive every stage after the catalog fetch.
///
/// Split out so tests can inject a synthetic catalog and a mock transport.
pub fn run_with_catalog(
    config: &MirrorConfig,
    repos: &RepositorySet,
    git: &dyn GitTransport,
) -> Result<RunReport, PipelineError> {
    tracing::info!("writing inventory to {}", config.inventory_path.display());
    inventory::write_inventory(&config.inventory_path, repos)?;
    tracing::info!("inventory complete: {} rows", repos.len());

    store::prepare_root(&config.mirror_root).map_err(|source| PipelineError::MirrorRoot {
        path: config.mirror_root.clone(),
        source,
    })?;

    tracing::info!(
        "cloning missing mirrors under {}",
        config.mirror_root.display(),
    );
    let mut cloned = 0;
    let mut existing = 0;
    let mut clone_failures = 0;
    let mut entries = Vec::with_capacity(repos.len());
    for record in repos {
        let (entry, result) = store::ensure_cloned(record, &config.mirror_root, git);
        match result {
            CloneResult::Cloned => cloned += 1,
            CloneResult::Existing => existing += 1,
            CloneResult::Failed => clone_failures += 1,
        }
        entries.push(entry);
    }
    tracing::info!(
        "clone sweep complete: {cloned} cloned, {existing} existing, {clone_failures} failed",
    );

    // Two full sweeps, never interleaved per repository: every default
    // branch is pulled before the first all-branch fetch starts.
    tracing::info!("pulling default branches");
    let mut pull_failures = 0;
    for entry in &entries {
        if branches::update_default_branch(entry, git) == BranchOutcome::Failed {
            pull_failures += 1;
        }
    }
    tracing::info!("pull sweep complete: {pull_failures} failures");

    tracing::info!("fetching all branches");
    let mut fetch_failures = 0;
    for entry in &entries {
        if branches::fetch_all_branches(entry, git) == BranchOutcome::Failed {
            fetch_failures += 1;
        }
    }
    tracing::info!("fetch sweep complete: {fetch_failures} failures");

    tracing::info!("building archive at {}", config.archive_path.display());
    let manifest = archive::build(&config.mirror_root, &config.archive_path)?;
    tracing::info!("archive complete: {} entries", manifest.entries.len());

    let status = if clone_failures + pull_failures + fetch_failures == 0 {
        RunStatus::Complete
    } else {
        RunStatus::Partial
    };
    Ok(RunReport {
        total: repos.len(),
        cloned,
        existing,
        clone_failures,
        pull_failures,
        fetch_failures,
        archived_entries: manifest.entries.len(),
        status,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use gitvault_core::types::RepoId;
    use gitvault_core::{AccountName, RepositoryRecord};
    use tempfile::TempDir;

    use super::*;
    use crate::git::testing::{Call, RecordingGit};

    fn record(id: u64, name: &str) -> RepositoryRecord {
        RepositoryRecord {
            id: RepoId(id),
            name: name.to_string(),
            full_name: format!("octocat/{name}"),
            private: false,
            owner_login: "octocat".to_string(),
            html_url: format!("https://github.com/octocat/{name}"),
            clone_url: format!("https://github.com/octocat/{name}.git"),
            created_at: None,
            updated_at: None,
            pushed_at: None,
            description: None,
        }
    }

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config_in(dir: &TempDir) -> MirrorConfig {
        let mut config = MirrorConfig::new(AccountName::from("octocat"), None);
        config.mirror_root = dir.path().join("repos");
        config.inventory_path = dir.path().join("repos.csv");
        config.archive_path = dir.path().join("repos.tar.gz");
        config
    }

    #[test]
    fn clean_run_reports_complete_and_writes_both_artifacts() {
        init_logs();
        let dir = TempDir::new().expect("dir");
        let config = config_in(&dir);
        let repos = RepositorySet::from_fetched(vec![record(1, "alpha"), record(2, "beta")]);
        let git = RecordingGit::default();

        let report = run_with_catalog(&config, &repos, &git).expect("run");

        assert_eq!(report.status, RunStatus::Complete);
        assert_eq!(report.total, 2);
        assert_eq!(report.cloned, 2);
        assert_eq!(report.existing, 0);
        assert_eq!(report.archived_entries, 2);
        assert!(config.inventory_path.is_file());
        assert!(config.archive_path.is_file());
    }

    #[test]
    fn clone_failure_does_not_stop_other_repositories() {
        init_logs();
        let dir = TempDir::new().expect("dir");
        let config = config_in(&dir);
        let repos = RepositorySet::from_fetched(vec![record(1, "broken"), record(2, "healthy")]);
        let git = RecordingGit {
            fail_clone_targets: vec!["broken-1".to_string()],
            ..Default::default()
        };

        let report = run_with_catalog(&config, &repos, &git).expect("run");

        assert_eq!(report.status, RunStatus::Partial);
        assert_eq!(report.clone_failures, 1);
        assert_eq!(report.cloned, 1);

        // The healthy repository still went through pull and fetch-all.
        let healthy_dir = config.mirror_root.join("healthy-2");
        let calls = git.calls();
        assert!(calls.contains(&Call::Pull(healthy_dir.clone())));
        assert!(calls.contains(&Call::FetchAll(healthy_dir)));
        // The broken repository never reached the branch sweeps.
        let broken_dir = config.mirror_root.join("broken-1");
        assert!(!calls.contains(&Call::Pull(broken_dir.clone())));
        assert!(!calls.contains(&Call::FetchAll(broken_dir)));
    }

    #[test]
    fn pull_sweep_finishes_before_fetch_sweep_starts() {
        let dir = TempDir::new().expect("dir");
        let config = config_in(&dir);
        let repos = RepositorySet::from_fetched(vec![
            record(1, "alpha"),
            record(2, "beta"),
            record(3, "gamma"),
        ]);
        let git = RecordingGit::default();

        run_with_catalog(&config, &repos, &git).expect("run");

        let calls = git.calls();
        let last_pull = calls
            .iter()
            .rposition(|c| matches!(c, Call::Pull(_)))
            .expect("pull calls");
        let first_fetch = calls
            .iter()
            .position(|c| matches!(c, Call::FetchAll(_)))
            .expect("fetch calls");
        assert!(last_pull < first_fetch);
    }

    #[test]
    fn pull_and_fetch_failures_degrade_to_partial() {
        let dir = TempDir::new().expect("dir");
        let config = config_in(&dir);
        let repos = RepositorySet::from_fetched(vec![record(1, "alpha"), record(2, "beta")]);
        let alpha_dir: PathBuf = dir.path().join("repos").join("alpha-1");
        let git = RecordingGit {
            fail_pull_dirs: vec![alpha_dir.clone()],
            fail_fetch_dirs: vec![alpha_dir],
            ..Default::default()
        };

        let report = run_with_catalog(&config, &repos, &git).expect("run");

        assert_eq!(report.status, RunStatus::Partial);
        assert_eq!(report.pull_failures, 1);
        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.clone_failures, 0);
        assert!(config.archive_path.is_file());
    }

    #[test]
    fn second_run_skips_existing_mirrors() {
        let dir = TempDir::new().expect("dir");
        let config = config_in(&dir);
        let repos = RepositorySet::from_fetched(vec![record(1, "alpha")]);
        let git = RecordingGit::default();

        run_with_catalog(&config, &repos, &git).expect("first run");
        let second = run_with_catalog(&config, &repos, &git).expect("second run");

        assert_eq!(second.cloned, 0);
        assert_eq!(second.existing, 1);
        let clones = git
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Clone { .. }))
            .count();
        assert_eq!(clones, 1);
    }

    #[test]
    fn unwritable_inventory_is_fatal() {
        let dir = TempDir::new().expect("dir");
        let mut config = config_in(&dir);
        config.inventory_path = dir.path().join("missing-dir").join("repos.csv");
        let repos = RepositorySet::from_fetched(vec![record(1, "alpha")]);
        let git = RecordingGit::default();

        let result = run_with_catalog(&config, &repos, &git);
        assert!(matches!(result, Err(PipelineError::Inventory(_))));
        assert!(git.calls().is_empty());
    }
}
