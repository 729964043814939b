//! Scan result aggregation.
//!
//! Folds a finished [`DigestToFiles`] store into the [`ScanResult`] handed
//! to the report formatters and the removal action.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::groups::{DigestToFiles, DuplicateGroup};
use crate::scanner::{FileMeta, ScanError, ScanErrors};
use crate::size::format_size;

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Duplicate groups (2+ files each), in first-seen order
    pub groups: Vec<DuplicateGroup>,
    /// Number of redundant copies across all groups
    pub duplicate_count: usize,
    /// Bytes reclaimable by keeping one copy per group
    pub savings_bytes: u64,
    /// Metadata for every file considered, duplicate or not
    pub all_files: HashMap<PathBuf, FileMeta>,
    /// Per-entry and per-file failures; the scan went on regardless
    pub errors: ScanErrors,
    /// Number of files successfully fingerprinted
    pub hashed_files: usize,
    /// Wall-clock duration of the whole scan
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Build a result from a finished grouping store.
    ///
    /// # Arguments
    ///
    /// * `store` - Grouping store after the pipeline's barrier
    /// * `all_files` - Metadata for every enumerated file
    /// * `errors` - Enumeration and hashing failures
    #[must_use]
    pub fn from_store(
        store: DigestToFiles,
        all_files: HashMap<PathBuf, FileMeta>,
        errors: Vec<ScanError>,
    ) -> Self {
        let duplicate_count = store.duplicate_count();
        let savings_bytes = store.savings_bytes();
        let hashed_files = store.iter().map(|(_, paths)| paths.len()).sum();
        let groups = store.into_groups();

        log::debug!(
            "Aggregated {} group(s), {} duplicate(s), {} reclaimable",
            groups.len(),
            duplicate_count,
            savings_bytes
        );

        Self {
            groups,
            duplicate_count,
            savings_bytes,
            all_files,
            errors: ScanErrors(errors),
            hashed_files,
            scan_duration: Duration::ZERO,
        }
    }

    /// Total number of files considered.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.all_files.len()
    }

    /// Check whether any duplicate group was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// The combined per-file error, if anything failed.
    #[must_use]
    pub fn error(&self) -> Option<&ScanErrors> {
        (!self.errors.is_empty()).then_some(&self.errors)
    }

    /// One-line human summary of the duplicates found.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Found {} duplicates. A total of {} can be saved by removing them.",
            self.duplicate_count,
            format_size(self.savings_bytes)
        )
    }
}
