//! Snapshot restore for the working databases directory
//!
//! A configuration root holds two sibling directories: `databases/`, the
//! mutable working data, and `empty_databases/`, a read-only template of the
//! pristine state. Restoring deletes the former and recreates it as a
//! recursive copy of the latter, giving tests a known-clean starting point.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Working data directory name, relative to a configuration root
pub const DATABASES_DIR: &str = "databases";

/// Template directory name, relative to a configuration root
pub const EMPTY_DATABASES_DIR: &str = "empty_databases";

/// Status value a command-triggered restore reports back
pub const STATUS_CLEARED: &str = "database cleared";

/// Error types for snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The template directory does not exist under the root
    #[error("snapshot template missing at '{0}'")]
    MissingTemplate(PathBuf),

    /// Deleting the working directory failed
    #[error("failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Creating a directory in the working tree failed
    #[error("failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listing a template directory failed
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Copying a template file failed
    #[error("failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of a completed restore
#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    /// Files copied out of the template
    pub files_copied: usize,

    /// When the restore finished
    pub restored_at: DateTime<Utc>,
}

/// Reset `root/databases` to a fresh copy of `root/empty_databases`
///
/// Deletes the working directory if present, then copies the template tree
/// byte for byte. The template is never modified. The delete-then-copy
/// sequence is not atomic: a failure mid-way can leave the working directory
/// missing or partial, and the next invocation retries both phases. Callers
/// must not run this concurrently with anything reading or writing the same
/// tree.
pub fn restore(root: &Path) -> Result<RestoreReport, SnapshotError> {
    let template = root.join(EMPTY_DATABASES_DIR);
    let target = root.join(DATABASES_DIR);

    if !template.is_dir() {
        return Err(SnapshotError::MissingTemplate(template));
    }

    info!(
        "restoring {} from {}",
        target.display(),
        template.display()
    );

    if target.exists() {
        fs::remove_dir_all(&target).map_err(|source| SnapshotError::Remove {
            path: target.clone(),
            source,
        })?;
    } else {
        debug!("{} not present, nothing to delete", target.display());
    }

    let files_copied = copy_dir_recursive(&template, &target)?;
    info!("restore complete, {} file(s) copied", files_copied);

    Ok(RestoreReport {
        files_copied,
        restored_at: Utc::now(),
    })
}

/// Recursively copy a directory tree, returning the number of files copied
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, SnapshotError> {
    fs::create_dir_all(dst).map_err(|source| SnapshotError::Create {
        path: dst.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(src).map_err(|source| SnapshotError::Read {
        path: src.to_path_buf(),
        source,
    })?;

    let mut files_copied = 0;
    for entry in entries {
        let entry = entry.map_err(|source| SnapshotError::Read {
            path: src.to_path_buf(),
            source,
        })?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            files_copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            debug!("copy {} -> {}", src_path.display(), dst_path.display());
            fs::copy(&src_path, &dst_path).map_err(|source| SnapshotError::Copy {
                from: src_path.clone(),
                to: dst_path.clone(),
                source,
            })?;
            files_copied += 1;
        }
    }

    Ok(files_copied)
}
