//! File fingerprint type.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::size::format_size;

/// Properties of a file that identify its content to a very high degree
/// of confidence.
///
/// Equality requires all three fields to match, so files of different size
/// or extension never compare equal even if their hash strings coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileDigest {
    /// Lowercase extension without the leading dot; empty if none
    pub extension: String,
    /// Exact byte length at hash time
    pub size: u64,
    /// Mode prefix (`f`, `s` or none) followed by the lowercase hex digest
    pub hash: String,
}

impl FileDigest {
    /// Create a new digest.
    #[must_use]
    pub fn new(extension: impl Into<String>, size: u64, hash: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            size,
            hash: hash.into(),
        }
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.extension,
            self.hash,
            format_size(self.size)
        )
    }
}

/// Normalized extension of `path`: lowercase, no leading dot.
///
/// Dotfiles such as `.bashrc` have no extension.
#[must_use]
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
