//! CSV output formatter for duplicate scan results.
//!
//! One row is generated for each file of each duplicate group.
//!
//! # Columns
//!
//! - `file hash`: fingerprint hash (prefixed for the fast modes)
//! - `file size`: size in bytes
//! - `last modified`: local time, e.g. `05-Mar-2024 02:07:09 PM`
//! - `file path`: absolute path
//!
//! # Example
//!
//! ```no_run
//! use dupscan::duplicates::{DuplicateFinder, ScanConfig};
//! use dupscan::output::csv::CsvOutput;
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(ScanConfig::new(vec![PathBuf::from(".")]));
//! let result = finder.find_duplicates().unwrap();
//!
//! let output = CsvOutput::new(&result.groups, &result.all_files);
//! output.write_to(std::io::stdout()).unwrap();
//! ```

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateGroup;
use crate::scanner::FileMeta;

/// Format of the `last modified` column.
pub const MODIFIED_FORMAT: &str = "%d-%b-%Y %I:%M:%S %p";

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "file hash")]
    hash: &'a str,
    #[serde(rename = "file size")]
    size: u64,
    #[serde(rename = "last modified")]
    modified: String,
    #[serde(rename = "file path")]
    path: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
    all_files: &'a HashMap<PathBuf, FileMeta>,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    ///
    /// `all_files` supplies the modification times recorded during the scan.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], all_files: &'a HashMap<PathBuf, FileMeta>) -> Self {
        Self { groups, all_files }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        // Written explicitly so an empty report still carries the header
        csv_writer.write_record(["file hash", "file size", "last modified", "file path"])?;

        for group in self.groups {
            for path in &group.paths {
                let row = CsvRow {
                    hash: &group.digest.hash,
                    size: group.digest.size,
                    modified: self.modified_time(path),
                    path: path.to_string_lossy().to_string(),
                };
                csv_writer.serialize(row)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn render(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }

    /// Modification time recorded at scan time, falling back to the disk.
    fn modified_time(&self, path: &Path) -> String {
        let modified = match self.all_files.get(path) {
            Some(meta) => Some(meta.modified),
            None => std::fs::metadata(path).and_then(|m| m.modified()).ok(),
        };
        modified.map_or_else(|| "unknown".to_string(), format_modified)
    }
}

/// Format a timestamp for the `last modified` column.
#[must_use]
pub fn format_modified(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format(MODIFIED_FORMAT).to_string()
}
