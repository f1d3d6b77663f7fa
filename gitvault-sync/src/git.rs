//! Narrow capability interface over the system `git` binary.
//!
//! The pipeline needs exactly three VCS operations: clone, pull, fetch-all.
//! Each is a blocking call that succeeds or fails with no richer contract.
//! Keeping them behind a trait lets tests substitute a recording transport
//! and leaves room to parallelize across repositories later without touching
//! any component contract.

use std::path::Path;
use std::process::Command;

use crate::error::GitError;

/// The three VCS operations the pipeline relies on.
pub trait GitTransport {
    /// `git clone <url> <target_dir>` with `parent_dir` as the working
    /// directory.
    fn clone_repo(&self, url: &str, parent_dir: &Path, target_dir: &str) -> Result<(), GitError>;

    /// `git pull` of the current branch inside `workdir`.
    fn pull(&self, workdir: &Path) -> Result<(), GitError>;

    /// `git fetch --all` inside `workdir`.
    fn fetch_all(&self, workdir: &Path) -> Result<(), GitError>;
}

/// [`GitTransport`] backed by the system `git` binary.
pub struct SystemGit;

impl SystemGit {
    fn run(mut cmd: Command, operation: &'static str) -> Result<(), GitError> {
        let output = cmd.output().map_err(GitError::Spawn)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Exit {
                operation,
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }
}

impl GitTransport for SystemGit {
    fn clone_repo(&self, url: &str, parent_dir: &Path, target_dir: &str) -> Result<(), GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg(url)
            .arg(target_dir)
            .current_dir(parent_dir);
        Self::run(cmd, "clone")
    }

    fn pull(&self, workdir: &Path) -> Result<(), GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("pull").current_dir(workdir);
        Self::run(cmd, "pull")
    }

    fn fetch_all(&self, workdir: &Path) -> Result<(), GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("fetch").arg("--all").current_dir(workdir);
        Self::run(cmd, "fetch --all")
    }
}
