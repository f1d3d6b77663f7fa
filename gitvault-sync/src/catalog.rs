//! Repository catalog — paginated listing fetch and ordered set construction.
//!
//! One catalog fetch is the authoritative view of an account's repositories
//! for a run. Pages of up to [`PAGE_SIZE`] records are requested in order,
//! following the `Link` header's `rel="next"` cursor until it disappears;
//! the concatenation is deduplicated and stable-sorted by
//! [`RepositorySet::from_fetched`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use gitvault_core::types::RepoId;
use gitvault_core::{MirrorConfig, RepositoryRecord, RepositorySet};

use crate::error::CatalogError;

/// Records requested per page; the listing API caps pages at 100.
pub const PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Wire DTOs — the subset of the listing payload the pipeline uses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RemoteOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RemoteRepo {
    id: u64,
    name: String,
    full_name: String,
    private: bool,
    owner: RemoteOwner,
    html_url: String,
    clone_url: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
    description: Option<String>,
}

impl From<RemoteRepo> for RepositoryRecord {
    fn from(repo: RemoteRepo) -> Self {
        RepositoryRecord {
            id: RepoId(repo.id),
            name: repo.name,
            full_name: repo.full_name,
            private: repo.private,
            owner_login: repo.owner.login,
            html_url: repo.html_url,
            clone_url: repo.clone_url,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            description: repo.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetch the complete, ordered repository set for the configured account.
///
/// The visibility scope and credential come from `config`; they were fixed
/// together when the config was built, so an anonymous fetch explicitly asks
/// the API for public repositories only.
pub fn fetch(config: &MirrorConfig) -> Result<RepositorySet, CatalogError> {
    let agent = ureq::agent();
    let mut url = format!(
        "{}/users/{}/repos?type={}&per_page={}",
        config.api_base.trim_end_matches('/'),
        config.account,
        config.scope,
        PAGE_SIZE,
    );

    let mut fetched: Vec<RepositoryRecord> = Vec::new();
    loop {
        let mut request = agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "gitvault");
        if let Some(credential) = &config.credential {
            request = request.set(
                "Authorization",
                &format!("Bearer {}", credential.expose()),
            );
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status @ (401 | 403), _))
                if config.credential.is_some() =>
            {
                return Err(CatalogError::Authorization { status });
            }
            Err(ureq::Error::Status(status, _)) => {
                return Err(CatalogError::Status { status, url });
            }
            Err(err) => return Err(CatalogError::Transport(Box::new(err))),
        };

        // The cursor must be read before the body consumes the response.
        let next = response.header("link").and_then(next_page_url);
        let page: Vec<RemoteRepo> = response.into_json().map_err(CatalogError::Decode)?;
        tracing::debug!("fetched page of {} repositories from {url}", page.len());
        fetched.extend(page.into_iter().map(RepositoryRecord::from));

        match next {
            Some(next_url) => url = next_url,
            None => break,
        }
    }

    Ok(RepositorySet::from_fetched(fetched))
}

/// Extract the `rel="next"` target from a `Link` header, if any.
fn next_page_url(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let (target, params) = link.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| param.trim() == "rel=\"next\"");
        if !is_next {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Some(target.to_string())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
