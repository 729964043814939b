//! Duplicate finder: enumeration, concurrent hashing and grouping.
//!
//! # Overview
//!
//! [`DuplicateFinder::find_duplicates`] runs the whole pipeline:
//! 1. **Validate** - every root must be a readable directory
//! 2. **Walk** - enumerate qualifying files (see [`crate::scanner::walker`])
//! 3. **Hash** - fingerprint every file on a bounded rayon pool ([`hash_files`])
//! 4. **Group** - a single aggregation thread owns the [`DigestToFiles`] store
//! 5. **Aggregate** - fold the store into a [`ScanResult`]
//!
//! Hashing workers never touch the store. Each sends its result over a
//! channel tagged with the file's enumeration index, and the aggregator
//! inserts strictly in index order. Group order is therefore the walk order
//! no matter which worker finishes first.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::duplicates::{DuplicateFinder, ScanConfig};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(vec![PathBuf::from("/home/user/Pictures")])
//!     .with_min_size(4096)
//!     .with_parallelism(4);
//! let result = DuplicateFinder::new(config).find_duplicates().unwrap();
//!
//! println!("{}", result.summary_line());
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use super::groups::DigestToFiles;
use super::summary::ScanResult;
use crate::progress::{ProgressCallback, PHASE_HASHING, PHASE_WALKING};
use crate::scanner::{self, FileDigest, FileEntry, HashError, ScanError, WalkerConfig};

/// Default worker count: available processors minus one, at least one.
#[must_use]
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map_or(1, std::num::NonZeroUsize::get)
        .saturating_sub(1)
        .max(1)
}

/// Immutable configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directories to scan
    pub roots: Vec<PathBuf>,
    /// Base names to skip
    pub exclusions: HashSet<String>,
    /// Files smaller than this are ignored (bytes)
    pub min_size: u64,
    /// Number of hashing workers (minimum 1)
    pub parallelism: usize,
    /// Use SHA-256 over the whole file instead of sampled CRC32
    pub thorough: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            exclusions: HashSet::new(),
            min_size: 0,
            parallelism: default_parallelism(),
            thorough: false,
        }
    }
}

impl ScanConfig {
    /// Create a configuration for the given roots with default options.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    /// Set the excluded base names.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: HashSet<String>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set the minimum file size in bytes.
    #[must_use]
    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the worker count (clamped to at least 1).
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Enable or disable thorough (SHA-256) mode.
    #[must_use]
    pub fn with_thorough(mut self, thorough: bool) -> Self {
        self.thorough = thorough;
        self
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.exclusions.clone(), self.min_size)
    }
}

/// Fatal errors that prevent a scan from starting.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No input directory was given.
    #[error("No input directories passed")]
    NoInputPaths,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory exists but can't be listed.
    #[error("Directory not readable: {path}: {source}")]
    NotReadable {
        /// Path of the directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Check that every root is a readable directory.
///
/// # Returns
///
/// The roots made absolute, in the given order.
///
/// # Errors
///
/// `NoInputPaths` for an empty list, otherwise the first root that is
/// missing, not a directory, or can't be listed.
pub fn validate_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>, FinderError> {
    if roots.is_empty() {
        return Err(FinderError::NoInputPaths);
    }

    roots
        .iter()
        .map(|root| {
            let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => FinderError::PathNotFound(root.clone()),
                _ => FinderError::NotReadable {
                    path: root.clone(),
                    source: e,
                },
            })?;
            if !metadata.is_dir() {
                return Err(FinderError::NotADirectory(root.clone()));
            }
            std::fs::read_dir(root).map_err(|e| FinderError::NotReadable {
                path: root.clone(),
                source: e,
            })?;
            std::path::absolute(root).map_err(|e| FinderError::NotReadable {
                path: root.clone(),
                source: e,
            })
        })
        .collect()
}

/// One hashing outcome sent from a worker to the aggregator.
struct HashMessage {
    /// Position of the file in enumeration order
    index: usize,
    path: PathBuf,
    result: Result<FileDigest, HashError>,
}

/// Fingerprint `files` on a pool of `parallelism` workers and group them.
///
/// Every file is hashed exactly once. Failures are collected per file and
/// never stop the other workers. Returns only after all workers and the
/// aggregator have finished.
///
/// # Returns
///
/// The grouping store (keys in the order of `files`) and the hashing errors.
///
/// # Example
///
/// ```no_run
/// use dupscan::duplicates::hash_files;
/// use dupscan::scanner::{enumerate, WalkerConfig};
/// use std::path::PathBuf;
///
/// let (files, _) = enumerate(&[PathBuf::from(".")], &WalkerConfig::default());
/// let (store, errors) = hash_files(&files, false, 4, None);
/// println!("{} groups, {} errors", store.group_count(), errors.len());
/// ```
#[must_use]
pub fn hash_files(
    files: &[FileEntry],
    thorough: bool,
    parallelism: usize,
    progress: Option<&dyn ProgressCallback>,
) -> (DigestToFiles, Vec<ScanError>) {
    if files.is_empty() {
        log::debug!("No files to hash");
        return (DigestToFiles::new(), Vec::new());
    }

    let parallelism = parallelism.max(1);
    log::info!(
        "Hashing {} files with {} worker(s) ({} mode)",
        files.len(),
        parallelism,
        if thorough { "thorough" } else { "fast" }
    );

    if let Some(cb) = progress {
        cb.on_phase_start(PHASE_HASHING, files.len());
    }

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .thread_name(|i| format!("dupscan-hash-{i}"))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!(
                "Failed to create hashing pool, using global pool with {} threads: {}",
                rayon::current_num_threads(),
                e
            );
            None
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<HashMessage>();

    let (store, errors) = std::thread::scope(|scope| {
        let aggregator = scope.spawn(move || aggregate(rx));

        let work = || {
            files
                .par_iter()
                .enumerate()
                .for_each_with(tx, |tx, (index, file)| {
                    let result = scanner::digest(&file.path, thorough);

                    if let Some(cb) = progress {
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        cb.on_progress(done, file.path.to_string_lossy().as_ref());
                    }

                    // The aggregator outlives every sender, so this only fails
                    // if it panicked; the join below surfaces that.
                    let _ = tx.send(HashMessage {
                        index,
                        path: file.path.clone(),
                        result,
                    });
                });
        };

        match &pool {
            Some(pool) => pool.install(work),
            None => work(),
        }

        // Barrier: every sender is dropped once the parallel loop returns
        aggregator
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    });

    if let Some(cb) = progress {
        cb.on_phase_end(PHASE_HASHING);
    }

    log::info!(
        "Hashing complete: {} digests, {} duplicate group(s), {} failure(s)",
        store.len(),
        store.group_count(),
        errors.len()
    );

    (store, errors)
}

/// Sole owner of the grouping store during a scan.
///
/// Messages may arrive in any order; they are buffered and applied in
/// enumeration order.
fn aggregate(rx: Receiver<HashMessage>) -> (DigestToFiles, Vec<ScanError>) {
    let mut store = DigestToFiles::new();
    let mut errors = Vec::new();
    let mut pending: BTreeMap<usize, HashMessage> = BTreeMap::new();
    let mut next = 0;

    for message in rx {
        pending.insert(message.index, message);

        while let Some(message) = pending.remove(&next) {
            next += 1;
            match message.result {
                Ok(digest) => store.add(digest, message.path),
                Err(e) => {
                    log::warn!("Failed to hash {}: {}", message.path.display(), e);
                    errors.push(ScanError::Hash(e));
                }
            }
        }
    }

    debug_assert!(pending.is_empty(), "missing hashing results");
    (store, errors)
}

/// Duplicate finder that orchestrates the detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupscan::duplicates::{DuplicateFinder, ScanConfig};
/// use std::path::PathBuf;
///
/// let finder = DuplicateFinder::new(ScanConfig::new(vec![PathBuf::from(".")]));
/// match finder.find_duplicates() {
///     Ok(result) => {
///         println!("Found {} duplicate groups", result.groups.len());
///         println!("Can reclaim {} bytes", result.savings_bytes);
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateFinder {
    config: ScanConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Attach a progress reporter.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Find all duplicate files under the configured roots.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if no roots were given or a root is not a
    /// readable directory. Failures on individual entries or files are
    /// reported in [`ScanResult::errors`] instead.
    pub fn find_duplicates(&self) -> Result<ScanResult, FinderError> {
        let start_time = Instant::now();
        validate_roots(&self.config.roots)?;

        let progress = self.progress.as_deref();
        if let Some(cb) = progress {
            cb.on_phase_start(PHASE_WALKING, 0);
        }
        let (files, walk_errors) = scanner::enumerate(&self.config.roots, &self.config.walker_config());
        if let Some(cb) = progress {
            cb.on_progress(files.len(), "");
            cb.on_phase_end(PHASE_WALKING);
        }

        let mut result = self.group_files(files, walk_errors);
        result.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete in {:.2?}: {} files, {} duplicate(s), {} error(s)",
            result.scan_duration,
            result.total_files(),
            result.duplicate_count,
            result.errors.len()
        );

        Ok(result)
    }

    /// Hash and group an already enumerated file list.
    ///
    /// Useful when files come from somewhere other than the walker.
    #[must_use]
    pub fn find_duplicates_from_files(&self, files: Vec<FileEntry>) -> ScanResult {
        let start_time = Instant::now();
        let mut result = self.group_files(files, Vec::new());
        result.scan_duration = start_time.elapsed();
        result
    }

    fn group_files(&self, files: Vec<FileEntry>, mut errors: Vec<ScanError>) -> ScanResult {
        let (store, hash_errors) = hash_files(
            &files,
            self.config.thorough,
            self.config.parallelism,
            self.progress.as_deref(),
        );
        errors.extend(hash_errors);

        let all_files: HashMap<_, _> = files.into_iter().map(|f| (f.path, f.meta)).collect();

        ScanResult::from_store(store, all_files, errors)
    }
}
