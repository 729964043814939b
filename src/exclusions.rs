//! Excluded base names.
//!
//! An exclusions file holds one file or directory base name per line. Line
//! endings may be LF or CRLF; surrounding whitespace is trimmed; blank lines
//! and lines starting with `#` are ignored. Without a file the built-in list
//! is used.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Built-in exclusion list.
const DEFAULT_EXCLUSIONS: &str = include_str!("default_exclusions.txt");

/// Errors loading an exclusions file.
#[derive(Debug, Error)]
pub enum ExclusionsError {
    /// The path is missing or is not a regular file.
    #[error("exclusions path should be a readable file: {0}")]
    NotAFile(PathBuf),

    /// The file exists but couldn't be read.
    #[error("unable to read exclusions file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse newline-separated exclusions.
///
/// # Example
///
/// ```
/// use dupscan::exclusions::parse_exclusions;
///
/// let set = parse_exclusions("# comment\r\n.git\r\n\r\n  node_modules  \n");
/// assert!(set.contains(".git"));
/// assert!(set.contains("node_modules"));
/// assert_eq!(set.len(), 2);
/// ```
#[must_use]
pub fn parse_exclusions(contents: &str) -> HashSet<String> {
    contents
        .replace("\r\n", "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// The built-in exclusion set.
#[must_use]
pub fn default_exclusions() -> HashSet<String> {
    parse_exclusions(DEFAULT_EXCLUSIONS)
}

/// A few built-in names, for help text.
#[must_use]
pub fn default_exclusion_examples(count: usize) -> Vec<String> {
    let mut names: Vec<_> = default_exclusions().into_iter().collect();
    names.sort();
    names.truncate(count);
    names
}

/// Load exclusions from `path`.
///
/// # Errors
///
/// `NotAFile` if the path isn't a regular file, `Read` if reading fails.
pub fn load_exclusions(path: &Path) -> Result<HashSet<String>, ExclusionsError> {
    if !path.is_file() {
        return Err(ExclusionsError::NotAFile(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ExclusionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let exclusions = parse_exclusions(&contents);
    log::debug!(
        "Loaded {} exclusion(s) from {}",
        exclusions.len(),
        path.display()
    );
    Ok(exclusions)
}

/// Load from `path` if given, otherwise return the built-in set.
///
/// # Errors
///
/// See [`load_exclusions`].
pub fn resolve_exclusions(path: Option<&Path>) -> Result<HashSet<String>, ExclusionsError> {
    match path {
        Some(path) => load_exclusions(path),
        None => Ok(default_exclusions()),
    }
}
