//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Parallel directory walking using jwalk
//! - Content fingerprints (sampled CRC32 or full SHA-256)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Two-mode file hashing producing a [`FileDigest`]
//! - [`digest`]: The [`FileDigest`] fingerprint type
//!
//! # Example
//!
//! ```no_run
//! use dupscan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! // Configure the walker
//! let config = WalkerConfig {
//!     min_size: 1024,  // Skip files under 1KiB
//!     ..Default::default()
//! };
//!
//! // Walk the directory
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.meta.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod digest;
pub mod hasher;
pub mod walker;

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

// Re-export main types
pub use digest::FileDigest;
pub use hasher::{digest, read_crucial_bytes, THRESHOLD_FILE_SIZE};
pub use walker::{enumerate, Walker};

/// Metadata retained for every scanned file.
///
/// Captured once during enumeration and consumed by the report
/// formatters (CSV needs the timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileMeta {
    /// Create new file metadata.
    #[must_use]
    pub fn new(size: u64, modified: SystemTime) -> Self {
        Self { size, modified }
    }

    /// Modification time as seconds since the Unix epoch.
    ///
    /// Times before the epoch are reported as negative values.
    #[must_use]
    pub fn modified_timestamp(&self) -> i64 {
        match self.modified.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}

/// A discovered file: absolute path plus its metadata.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Size and modification time
    pub meta: FileMeta,
}

impl FileEntry {
    /// Create a new FileEntry.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            meta: FileMeta::new(size, modified),
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Base names (files or directories) to skip. Exact match only.
    pub exclusions: HashSet<String>,

    /// Minimum file size to include (in bytes).
    /// Files strictly smaller than this are skipped.
    pub min_size: u64,
}

impl WalkerConfig {
    /// Create a new walker configuration.
    #[must_use]
    pub fn new(exclusions: HashSet<String>, min_size: u64) -> Self {
        Self {
            exclusions,
            min_size,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fingerprinting a file failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path is a symlink, directory, device or other special file.
    #[error("Can't compute hash of non-regular file: {0}")]
    NotRegularFile(PathBuf),

    /// A sampled region could not be read in full.
    #[error("Couldn't read {region} bytes of {path} (maybe file is corrupted?)")]
    Truncated {
        /// Path of the file
        path: PathBuf,
        /// Which region failed: "first", "middle" or "end"
        region: &'static str,
    },

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while hashing `path`.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Every per-entry and per-file failure of a scan, combined into one value.
#[derive(Debug, Default)]
pub struct ScanErrors(pub Vec<ScanError>);

impl ScanErrors {
    /// Number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the individual errors.
    pub fn iter(&self) -> impl Iterator<Item = &ScanError> {
        self.0.iter()
    }
}

impl fmt::Display for ScanErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) during scan", self.0.len())?;
        for err in &self.0 {
            write!(f, "; {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScanErrors {}
