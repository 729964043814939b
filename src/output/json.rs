//! JSON output formatter for duplicate scan results.
//!
//! # Output Schema
//!
//! ```json
//! [
//!   {
//!     "extension": "jpg",
//!     "size": 1048576,
//!     "hash": "s1c9a52e0",
//!     "paths": ["/photos/a.jpg", "/backup/a.jpg"]
//!   }
//! ]
//! ```
//!
//! Groups appear in discovery order, paths in enumeration order.

use std::io::Write;

use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Errors that can occur during JSON output generation.
#[derive(Debug, Error)]
pub enum JsonOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during JSON serialization.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON output formatter.
pub struct JsonOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.groups)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.groups)
    }

    /// Write JSON output to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        if pretty {
            serde_json::to_writer_pretty(&mut *writer, self.groups)?;
        } else {
            serde_json::to_writer(&mut *writer, self.groups)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
