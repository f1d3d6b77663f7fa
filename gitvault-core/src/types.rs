//! Domain types for the GitVault mirror pipeline.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Remote metadata is immutable once fetched: downstream stages borrow
//! records out of the [`RepositorySet`], they never mutate or re-sort it.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed remote repository identifier, unique per host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId(pub u64);

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for RepoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A strongly-typed account (user or organization) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountName(pub String);

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AccountName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which remote repositories a catalog fetch may see.
///
/// Derived once from credential presence when the [`crate::MirrorConfig`] is
/// built, and logged at the start of a run — never re-inferred inside
/// component logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityScope {
    /// Public repositories only (no credential supplied).
    #[default]
    Public,
    /// Everything the credential can see.
    All,
}

impl fmt::Display for VisibilityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityScope::Public => write!(f, "public"),
            VisibilityScope::All => write!(f, "all"),
        }
    }
}

/// Whether a repository's mirror directory exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Absent,
    Present,
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Remote metadata for a single repository, as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: RepoId,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner_login: String,
    pub html_url: String,
    pub clone_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RepositoryRecord {
    /// Local directory name for this repository's mirror.
    ///
    /// Keyed by the unique numeric id with the display name as a label, so
    /// two repositories sharing a display name cannot collide on disk.
    pub fn mirror_dir_name(&self) -> String {
        format!("{}-{}", self.name, self.id)
    }
}

/// The ordered catalog of an account's repositories for one pipeline run.
///
/// Construction enforces the set invariants: duplicate ids are dropped (the
/// first fetch occurrence wins) and records are stable-sorted by descending
/// `updated_at`, so equal timestamps keep fetch order and records without an
/// update timestamp sort last. The order is fixed here and never changed
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositorySet {
    records: Vec<RepositoryRecord>,
}

impl RepositorySet {
    /// Build the set from records in fetch order (concatenated pages).
    pub fn from_fetched(fetched: Vec<RepositoryRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut records: Vec<RepositoryRecord> = fetched
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .collect();
        // `Option` ordering puts `None` below any `Some`, so the reversed
        // comparison leaves timestamp-less records at the tail.
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Self { records }
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RepositorySet {
    type Item = &'a RepositoryRecord;
    type IntoIter = std::slice::Iter<'a, RepositoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A repository's relation to local disk for the current run.
///
/// Presence is read from the filesystem when the entry is built; it is never
/// cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry<'a> {
    pub record: &'a RepositoryRecord,
    /// Full path of the mirror directory under the configured mirror root.
    pub path: PathBuf,
    pub presence: Presence,
}

impl MirrorEntry<'_> {
    pub fn is_present(&self) -> bool {
        self.presence == Presence::Present
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
