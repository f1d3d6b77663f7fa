//! Error types for gitvault-sync.
//!
//! One enum per concern, mirroring the failure taxonomy of the pipeline:
//! catalog and archive failures are fatal, git failures are caught and
//! logged by the stage that triggered them.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// All errors that can arise from a catalog fetch.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The listing API could not be reached at all.
    #[error("listing API unreachable: {0}")]
    Transport(#[source] Box<ureq::Error>),

    /// The API answered with a non-success status other than an auth
    /// rejection.
    #[error("listing API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Credentials were presented and rejected.
    #[error("listing API rejected the credential (HTTP {status})")]
    Authorization { status: u16 },

    /// The response body did not match the repository schema.
    #[error("malformed listing response: {0}")]
    Decode(#[source] std::io::Error),
}

/// Failure of a git subprocess invocation.
///
/// The capability reports success or failure only; stderr is carried solely
/// for the warning line.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to launch git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git {operation} exited with {status}: {stderr}")]
    Exit {
        operation: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

/// All errors that can arise from the inventory export.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// All errors that can arise from an archive build.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walk over the mirror root failed.
    #[error("walk failed under {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Fatal pipeline failures.
///
/// Per-repository clone/pull/fetch failures never surface here; they are
/// logged and counted in the run report instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog fetch failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("inventory export failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("cannot create mirror root {path}: {source}")]
    MirrorRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("archive build failed: {0}")]
    Archive(#[from] ArchiveError),
}

/// Convenience constructor for [`InventoryError::Io`].
pub(crate) fn inventory_io(path: impl Into<PathBuf>, source: std::io::Error) -> InventoryError {
    InventoryError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`ArchiveError::Io`].
pub(crate) fn archive_io(path: impl Into<PathBuf>, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.into(),
        source,
    }
}
