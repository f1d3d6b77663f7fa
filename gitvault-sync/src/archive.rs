//! Archive builder — one walk of the mirror root into a single `.tar.gz`.
//!
//! The archive is built next to its final path and renamed into place, so a
//! mid-walk failure never destroys a previously valid archive. The walk is
//! not fault-isolated: any unreadable file aborts the build. Nothing is
//! filtered out — VCS metadata directories are packaged along with everything
//! else.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use crate::error::{archive_io, ArchiveError};

/// The (source path → archive entry name) pairs of one build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveManifest {
    pub entries: Vec<ArchiveEntry>,
}

/// One regular file packaged into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    /// Path relative to the mirror root; also the in-archive entry name.
    pub name: PathBuf,
}

/// Package every regular file under `mirror_root` into `archive_path`.
///
/// Directories are traversed but not emitted as entries. Files are visited
/// in name-sorted order so identical trees produce identical member order.
/// The build targets `<archive_path>.tmp` and atomically renames on success;
/// on failure the temp file is removed and any previous archive is left
/// untouched.
pub fn build(mirror_root: &Path, archive_path: &Path) -> Result<ArchiveManifest, ArchiveError> {
    let tmp = PathBuf::from(format!("{}.tmp", archive_path.display()));
    match build_to(mirror_root, &tmp) {
        Ok(manifest) => {
            std::fs::rename(&tmp, archive_path).map_err(|e| archive_io(archive_path, e))?;
            Ok(manifest)
        }
        Err(err) => {
            let _ = std::fs::remove_file(&tmp);
            Err(err)
        }
    }
}

fn build_to(mirror_root: &Path, tmp: &Path) -> Result<ArchiveManifest, ArchiveError> {
    let file = File::create(tmp).map_err(|e| archive_io(tmp, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut manifest = ArchiveManifest::default();

    for entry in WalkDir::new(mirror_root).sort_by_file_name() {
        let entry = entry.map_err(|source| ArchiveError::Walk {
            root: mirror_root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        // walkdir never yields a path outside the root it was given.
        let name = entry
            .path()
            .strip_prefix(mirror_root)
            .expect("walk stays under mirror root")
            .to_path_buf();
        builder
            .append_path_with_name(entry.path(), &name)
            .map_err(|e| archive_io(entry.path(), e))?;
        manifest.entries.push(ArchiveEntry {
            source: entry.path().to_path_buf(),
            name,
        });
    }

    let encoder = builder.into_inner().map_err(|e| archive_io(tmp, e))?;
    encoder.finish().map_err(|e| archive_io(tmp, e))?;
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
