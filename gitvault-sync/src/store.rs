//! Local mirror store — clone-if-absent, skip-if-present.
//!
//! Presence is read from the filesystem every run; nothing is cached. An
//! existing directory is never re-cloned, even if the mirror inside it is
//! stale or corrupt — freshening is the branch synchronizer's job.

use std::path::Path;

use gitvault_core::{MirrorEntry, Presence, RepositoryRecord};

use crate::git::GitTransport;

/// Outcome of reconciling one repository against the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneResult {
    /// The mirror directory was created by a fresh clone.
    Cloned,
    /// The directory already existed; no clone was attempted.
    Existing,
    /// The clone failed; the repository stays absent for this run.
    Failed,
}

/// Create the mirror root (and parents) once, before any repository is
/// processed. Failure here is fatal to the run.
pub fn prepare_root(root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root)
}

/// Reconcile one repository: clone if its directory is absent, otherwise do
/// nothing.
///
/// A clone failure is logged with the repository's name and clone URL and
/// leaves the entry absent; it never aborts the run.
pub fn ensure_cloned<'a>(
    record: &'a RepositoryRecord,
    root: &Path,
    git: &dyn GitTransport,
) -> (MirrorEntry<'a>, CloneResult) {
    let dir_name = record.mirror_dir_name();
    let path = root.join(&dir_name);

    if path.is_dir() {
        tracing::debug!("mirror exists, skipping clone: {}", record.full_name);
        let entry = MirrorEntry {
            record,
            path,
            presence: Presence::Present,
        };
        return (entry, CloneResult::Existing);
    }

    match git.clone_repo(&record.clone_url, root, &dir_name) {
        Ok(()) => {
            tracing::info!("cloned {} into {}", record.full_name, path.display());
            let entry = MirrorEntry {
                record,
                path,
                presence: Presence::Present,
            };
            (entry, CloneResult::Cloned)
        }
        Err(err) => {
            tracing::warn!(
                "clone failed for {} ({}): {err}",
                record.name,
                record.clone_url,
            );
            let entry = MirrorEntry {
                record,
                path,
                presence: Presence::Absent,
            };
            (entry, CloneResult::Failed)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
