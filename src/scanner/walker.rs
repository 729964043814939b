//! Directory walker implementation using jwalk for parallel traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting the regular files that qualify for fingerprinting.
//!
//! # Features
//!
//! - Parallel directory reading via jwalk, with children sorted by name so
//!   the output order is deterministic
//! - Exclusion of files and directories by exact base name; excluded
//!   directories are never descended into
//! - Minimum size filtering
//! - Symbolic links are neither followed nor yielded
//! - Per-entry errors are yielded inline and never stop the walk
//!
//! # Example
//!
//! ```no_run
//! use dupscan::scanner::{Walker, WalkerConfig};
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     exclusions: HashSet::from([".git".to_string()]),
//!     min_size: 4096,
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Pictures"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.meta.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use jwalk::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Absolute root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let root = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self { root, config }
    }

    /// The absolute root this walker scans.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether a base name is in the exclusion set.
    fn is_excluded(exclusions: &HashSet<String>, name: &std::ffi::OsStr) -> bool {
        !exclusions.is_empty() && exclusions.contains(name.to_string_lossy().as_ref())
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Returns an iterator over [`FileEntry`] results. Errors are yielded
    /// as [`ScanError`] values rather than stopping iteration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupscan::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let exclusions = Arc::new(self.config.exclusions.clone());

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .skip_hidden(false)
            .process_read_dir(move |_depth, _path, _read_dir_state, children| {
                // Drop excluded names before jwalk descends into them
                children.retain(|child| match child {
                    Ok(entry) => !Self::is_excluded(&exclusions, entry.file_name()),
                    Err(_) => true,
                });
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(mut entry) => {
                    // jwalk reports a directory it couldn't list on that
                    // directory's own entry, not as an Err item
                    if let Some(err) = entry.read_children_error.take() {
                        return Some(Err(Self::handle_jwalk_error(entry.path(), err)));
                    }

                    // Skip the root directory itself
                    if entry.depth == 0 {
                        return None;
                    }

                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }
                    if file_type.is_symlink() {
                        log::trace!("Skipping symlink: {}", entry.path().display());
                        return None;
                    }

                    self.process_file_entry(entry.path())
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    Some(Err(Self::handle_jwalk_error(path, e)))
                }
            })
    }

    /// Stat a candidate file and create a FileEntry if it qualifies.
    fn process_file_entry(&self, path: PathBuf) -> Option<Result<FileEntry, ScanError>> {
        let metadata = match std::fs::symlink_metadata(&path) {
            Ok(m) => m,
            Err(e) => return Some(Err(Self::handle_io_error(&path, e))),
        };

        // Sockets, devices, fifos
        if !metadata.file_type().is_file() {
            log::trace!("Skipping non-regular file: {}", path.display());
            return None;
        }

        let size = metadata.len();
        if size < self.config.min_size {
            log::trace!(
                "Skipping file below minimum size ({}): {}",
                size,
                path.display()
            );
            return None;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Ok(FileEntry::new(path, size, modified)))
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(path: &Path, error: std::io::Error) -> ScanError {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path.to_path_buf())
            }
            ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                ScanError::NotFound(path.to_path_buf())
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                ScanError::Io {
                    path: path.to_path_buf(),
                    source: error,
                }
            }
        }
    }

    /// Handle jwalk errors.
    fn handle_jwalk_error(path: PathBuf, error: jwalk::Error) -> ScanError {
        if let Some(io_error) = error.io_error() {
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    log::warn!("Permission denied: {}", path.display());
                    return ScanError::PermissionDenied(path);
                }
                std::io::ErrorKind::NotFound => {
                    log::debug!("Entry vanished during walk: {}", path.display());
                    return ScanError::NotFound(path);
                }
                _ => {}
            }
        }
        log::warn!("Walker error for {}: {}", path.display(), error);
        ScanError::Io {
            path,
            source: std::io::Error::other(error.to_string()),
        }
    }
}

/// Enumerate every qualifying file under `roots`, in root order.
///
/// A file reachable from more than one root (overlapping inputs) is
/// reported once. Per-entry errors are collected, not propagated.
///
/// # Returns
///
/// A tuple of the discovered files and the errors met along the way.
#[must_use]
pub fn enumerate(roots: &[PathBuf], config: &WalkerConfig) -> (Vec<FileEntry>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        let walker = Walker::new(root, config.clone());
        log::debug!("Walking {}", walker.root().display());

        for entry in walker.walk() {
            match entry {
                Ok(file) => {
                    if seen.insert(file.path.clone()) {
                        files.push(file);
                    } else {
                        log::debug!("Already enumerated: {}", file.path.display());
                    }
                }
                Err(e) => errors.push(e),
            }
        }
    }

    log::info!(
        "Enumerated {} files across {} root(s), {} error(s)",
        files.len(),
        roots.len(),
        errors.len()
    );

    (files, errors)
}
