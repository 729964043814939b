//! Duplicate grouping store.
//!
//! # Overview
//!
//! [`DigestToFiles`] is an insertion-ordered multimap from [`FileDigest`] to
//! the paths that share it. The first time a digest is seen it is appended
//! to the key order; later paths with the same digest extend its list. Only
//! digests with two or more paths count as duplicate groups.
//!
//! The store is mutated through `&mut self` and is therefore owned by a
//! single writer; the hashing pipeline funnels every result through one
//! aggregation thread (see [`crate::duplicates::finder`]).
//!
//! # Example
//!
//! ```
//! use dupscan::duplicates::DigestToFiles;
//! use dupscan::scanner::FileDigest;
//! use std::path::PathBuf;
//!
//! let mut store = DigestToFiles::new();
//! let digest = FileDigest::new("txt", 10, "f1234abcd");
//! store.add(digest.clone(), PathBuf::from("/a/1.txt"));
//! store.add(digest.clone(), PathBuf::from("/b/1.txt"));
//! store.add(FileDigest::new("txt", 3, "f00000001"), PathBuf::from("/a/2.txt"));
//!
//! assert_eq!(store.group_count(), 1);
//! assert_eq!(store.duplicate_count(), 1);
//! assert_eq!(store.savings_bytes(), 10);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::scanner::FileDigest;

/// Ordered multimap from digest to the paths sharing it.
#[derive(Debug, Clone, Default)]
pub struct DigestToFiles {
    /// Digests in first-seen order
    order: Vec<FileDigest>,
    /// Paths per digest, in insertion order
    paths: HashMap<FileDigest, Vec<PathBuf>>,
}

impl DigestToFiles {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the file at `path` has the given digest.
    pub fn add(&mut self, digest: FileDigest, path: PathBuf) {
        match self.paths.get_mut(&digest) {
            Some(list) => list.push(path),
            None => {
                self.order.push(digest.clone());
                self.paths.insert(digest, vec![path]);
            }
        }
    }

    /// Number of distinct digests, singletons included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no file has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over every digest and its paths in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileDigest, &[PathBuf])> + '_ {
        self.order.iter().map(move |digest| {
            let paths = self.paths.get(digest).map_or(&[][..], Vec::as_slice);
            (digest, paths)
        })
    }

    /// Iterate over duplicate groups (digests with 2+ paths) in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = (&FileDigest, &[PathBuf])> + '_ {
        self.iter().filter(|(_, paths)| paths.len() > 1)
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    /// Number of redundant copies: sum of `len - 1` over all groups.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.groups().map(|(_, paths)| paths.len() - 1).sum()
    }

    /// Bytes reclaimable by keeping one copy per group.
    #[must_use]
    pub fn savings_bytes(&self) -> u64 {
        self.groups()
            .map(|(digest, paths)| digest.size * (paths.len() as u64 - 1))
            .sum()
    }

    /// Consume the store, yielding owned duplicate groups in first-seen order.
    #[must_use]
    pub fn into_groups(mut self) -> Vec<DuplicateGroup> {
        self.order
            .into_iter()
            .filter_map(|digest| {
                let paths = self.paths.remove(&digest)?;
                (paths.len() > 1).then(|| DuplicateGroup::new(digest, paths))
            })
            .collect()
    }
}

/// Confirmed duplicate group of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Fingerprint shared by every file in the group
    #[serde(flatten)]
    pub digest: FileDigest,
    /// Absolute paths, in enumeration order
    #[serde(serialize_with = "serialize_paths_lossy")]
    pub paths: Vec<PathBuf>,
}

/// Paths that aren't valid UTF-8 are written with replacement characters,
/// as the text and CSV reports do.
fn serialize_paths_lossy<S>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(paths.iter().map(|path| Path::to_string_lossy(path)))
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(digest: FileDigest, paths: Vec<PathBuf>) -> Self {
        Self { digest, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Paths sorted lexicographically.
    #[must_use]
    pub fn sorted_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.paths.clone();
        paths.sort();
        paths
    }
}
