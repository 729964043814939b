//! Removal of redundant duplicate copies.
//!
//! # Overview
//!
//! For every duplicate group the paths are sorted lexicographically, the
//! first one is kept and every other path is deleted with
//! [`std::fs::remove_file`]. A failed deletion never stops the run; all
//! failures are collected and returned together with what did succeed.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::actions::remove_duplicates;
//! use dupscan::duplicates::{DuplicateFinder, ScanConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(ScanConfig::new(vec![PathBuf::from(".")]));
//! let result = finder.find_duplicates().unwrap();
//!
//! match remove_duplicates(&result.groups) {
//!     Ok(report) => println!("{}", report.summary()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::DuplicateGroup;
use crate::size::format_size;

/// Error type for a single failed deletion.
#[derive(Debug, Error)]
pub enum RemoveError {
    /// File was not found (may have been deleted or moved since the scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure.
    #[error("failed to remove {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RemoveError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the failed deletion was aimed at.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// What a removal pass deleted.
#[derive(Debug, Clone, Default)]
pub struct RemovalReport {
    /// Paths that were deleted, in processing order
    pub removed: Vec<PathBuf>,
    /// Paths that were kept, one per group
    pub kept: Vec<PathBuf>,
    /// Total bytes freed
    pub bytes_freed: u64,
}

impl RemovalReport {
    /// Number of files deleted.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Human-readable summary of the pass.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Removed {} file(s), freed {}",
            self.removed_count(),
            format_size(self.bytes_freed)
        )
    }
}

/// Every deletion failure of a removal pass, with the partial report.
#[derive(Debug)]
pub struct RemoveErrors {
    /// Failed deletions
    pub errors: Vec<RemoveError>,
    /// What was removed despite the failures
    pub report: RemovalReport,
}

impl fmt::Display for RemoveErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) could not be removed", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoveErrors {}

/// Keep/delete split for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    /// The copy that survives (lexicographically first path)
    pub keep: PathBuf,
    /// The copies to delete
    pub delete: Vec<PathBuf>,
    /// Size of each copy in bytes
    pub size: u64,
}

/// Compute which paths would be kept and deleted, without touching the disk.
///
/// Groups with fewer than two paths produce no plan.
#[must_use]
pub fn plan_removal(groups: &[DuplicateGroup]) -> Vec<RemovalPlan> {
    groups
        .iter()
        .filter_map(|group| {
            let mut paths = group.sorted_paths().into_iter();
            let keep = paths.next()?;
            let delete: Vec<_> = paths.collect();
            (!delete.is_empty()).then(|| RemovalPlan {
                keep,
                delete,
                size: group.digest.size,
            })
        })
        .collect()
}

/// Delete every copy but the lexicographically first one in each group.
///
/// # Errors
///
/// Returns `RemoveErrors` if any deletion failed. Deletion continues past
/// failures, so the error carries the report of what was removed.
pub fn remove_duplicates(groups: &[DuplicateGroup]) -> Result<RemovalReport, RemoveErrors> {
    let mut report = RemovalReport::default();
    let mut errors = Vec::new();

    for plan in plan_removal(groups) {
        log::debug!("Keeping {}", plan.keep.display());
        for path in plan.delete {
            match fs::remove_file(&path) {
                Ok(()) => {
                    log::info!("Removed: {} ({} bytes)", path.display(), plan.size);
                    report.bytes_freed += plan.size;
                    report.removed.push(path);
                }
                Err(e) => {
                    log::warn!("Failed to remove {}: {}", path.display(), e);
                    errors.push(RemoveError::from_io(&path, e));
                }
            }
        }
        report.kept.push(plan.keep);
    }

    if errors.is_empty() {
        Ok(report)
    } else {
        Err(RemoveErrors { errors, report })
    }
}
