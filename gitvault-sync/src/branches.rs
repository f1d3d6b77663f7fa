//! Branch synchronizer — default-branch pull and all-branch fetch.
//!
//! The pipeline runs these as two full sweeps over the repository set: every
//! mirror's default branch is pulled before any mirror fetches its remote
//! branches. The split bounds the blast radius of one slow or hanging fetch
//! so it cannot delay default-branch freshness for repositories later in the
//! set.

use gitvault_core::MirrorEntry;

use crate::git::GitTransport;

/// Outcome of one branch operation on one mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The git operation completed.
    Updated,
    /// The mirror directory is absent (clone never happened); nothing to do.
    SkippedAbsent,
    /// The git operation failed; logged, never fatal.
    Failed,
}

/// Pull the current branch inside the mirror directory.
pub fn update_default_branch(entry: &MirrorEntry<'_>, git: &dyn GitTransport) -> BranchOutcome {
    if !entry.is_present() {
        return BranchOutcome::SkippedAbsent;
    }
    match git.pull(&entry.path) {
        Ok(()) => {
            tracing::info!("pulled default branch: {}", entry.record.full_name);
            BranchOutcome::Updated
        }
        Err(err) => {
            tracing::warn!("pull failed for {}: {err}", entry.record.name);
            BranchOutcome::Failed
        }
    }
}

/// Fetch every remote branch inside the mirror directory.
pub fn fetch_all_branches(entry: &MirrorEntry<'_>, git: &dyn GitTransport) -> BranchOutcome {
    if !entry.is_present() {
        return BranchOutcome::SkippedAbsent;
    }
    match git.fetch_all(&entry.path) {
        Ok(()) => {
            tracing::info!("fetched all branches: {}", entry.record.full_name);
            BranchOutcome::Updated
        }
        Err(err) => {
            tracing::warn!("fetch --all failed for {}: {err}", entry.record.name);
            BranchOutcome::Failed
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
