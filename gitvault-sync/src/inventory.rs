//! CSV inventory export.
//!
//! One row per repository in catalog order, no header row; the file is
//! truncated and rewritten on every run, so it only ever reflects the most
//! recent catalog.
//!
//! Column order: id, name, full_name, private, owner_login, html_url,
//! created_at, updated_at, pushed_at, description. Timestamps are RFC 3339,
//! empty when the API returned none.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};

use gitvault_core::RepositorySet;

use crate::error::{inventory_io, InventoryError};

/// Write the inventory for `repos` to `path`, replacing any previous file.
pub fn write_inventory(path: &Path, repos: &RepositorySet) -> Result<(), InventoryError> {
    let file = File::create(path).map_err(|e| inventory_io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    for repo in repos {
        writer.write_record([
            repo.id.to_string(),
            repo.name.clone(),
            repo.full_name.clone(),
            repo.private.to_string(),
            repo.owner_login.clone(),
            repo.html_url.clone(),
            timestamp(repo.created_at),
            timestamp(repo.updated_at),
            timestamp(repo.pushed_at),
            repo.description.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush().map_err(|e| inventory_io(path, e))?;
    Ok(())
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
