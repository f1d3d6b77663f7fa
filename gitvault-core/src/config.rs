//! Run configuration for the mirror pipeline.
//!
//! One [`MirrorConfig`] is assembled at the CLI boundary and threaded into
//! every component call. Components never read environment variables, the
//! working directory, or any other ambient state.

use std::fmt;
use std::path::PathBuf;

use crate::types::{AccountName, VisibilityScope};

/// An API credential. `Debug` never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// The account whose repositories are mirrored. Required.
    pub account: AccountName,
    /// Optional listing credential.
    pub credential: Option<Credential>,
    /// Derived once from credential presence in [`MirrorConfig::new`]; the
    /// pipeline logs it so narrowing to public repositories is visible
    /// rather than silent.
    pub scope: VisibilityScope,
    /// Base URL of the listing API.
    pub api_base: String,
    /// Directory that holds one mirror directory per repository.
    pub mirror_root: PathBuf,
    /// CSV inventory output path, overwritten each run.
    pub inventory_path: PathBuf,
    /// Archive output path, overwritten (atomically) each run.
    pub archive_path: PathBuf,
}

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

impl MirrorConfig {
    /// Build a config for `account` with default output paths.
    ///
    /// The visibility scope follows credential presence: without a credential
    /// the catalog narrows to public repositories instead of failing.
    pub fn new(account: AccountName, credential: Option<Credential>) -> Self {
        let scope = if credential.is_some() {
            VisibilityScope::All
        } else {
            VisibilityScope::Public
        };
        Self {
            account,
            credential,
            scope,
            api_base: DEFAULT_API_BASE.to_string(),
            mirror_root: PathBuf::from("repos"),
            inventory_path: PathBuf::from("repos.csv"),
            archive_path: PathBuf::from("repos.tar.gz"),
        }
    }
}
