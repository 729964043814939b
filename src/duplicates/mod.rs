//! Duplicate detection module.
//!
//! This module provides:
//! - The concurrent hashing pipeline ([`hash_files`])
//! - The insertion-ordered grouping store ([`DigestToFiles`])
//! - Result aggregation ([`ScanResult`])
//! - The end-to-end [`DuplicateFinder`]

pub mod finder;
pub mod groups;
pub mod summary;

pub use finder::{
    default_parallelism, hash_files, validate_roots, DuplicateFinder, FinderError, ScanConfig,
};
pub use groups::{DigestToFiles, DuplicateGroup};
pub use summary::ScanResult;
