//! Report generation for duplicate scan results.
//!
//! Four modes are supported:
//! - `text`: plain text report written to `./duplicates_<run id>.txt`
//! - `csv`: one row per duplicate file, written to `./duplicates_<run id>.csv`
//! - `json`: array of groups, written to `./duplicates_<run id>.json`
//! - `stdout`: the text report printed after a run id banner
//!
//! The report file is created before the scan starts so an unwritable
//! working directory is reported without wasting a scan.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::duplicates::{DuplicateFinder, ScanConfig};
//! use dupscan::output::{generate_run_id, ReportWriter, OutputMode};
//! use std::path::PathBuf;
//!
//! let run_id = generate_run_id();
//! let writer = ReportWriter::create(OutputMode::Json, &run_id).unwrap();
//! let result = DuplicateFinder::new(ScanConfig::new(vec![PathBuf::from(".")]))
//!     .find_duplicates()
//!     .unwrap();
//! writer.write(&result).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use thiserror::Error;

use crate::duplicates::ScanResult;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::{stdout_banner, TextOutput};

/// Format of the run id, e.g. `241231_235959`.
pub const RUN_ID_FORMAT: &str = "%y%m%d_%H%M%S";

/// Where and how the duplicates report is produced.
///
/// Parsed from a string (see [`FromStr`](std::str::FromStr)) rather than by
/// clap so an unknown name maps to its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Text file in the current directory
    #[default]
    Text,
    /// CSV file in the current directory
    Csv,
    /// JSON file in the current directory
    Json,
    /// Text report on standard output
    Stdout,
}

impl OutputMode {
    /// All accepted modes.
    pub const ALL: [Self; 4] = [Self::Text, Self::Csv, Self::Json, Self::Stdout];

    /// Lowercase name, as accepted on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Stdout => "stdout",
        }
    }

    /// Report file extension, `None` for standard output.
    #[must_use]
    pub fn file_extension(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("txt"),
            Self::Csv => Some("csv"),
            Self::Json => Some("json"),
            Self::Stdout => None,
        }
    }

    /// Report file path for a run, `None` for standard output.
    #[must_use]
    pub fn report_file_name(self, run_id: &str) -> Option<PathBuf> {
        self.file_extension()
            .map(|ext| PathBuf::from(format!("./duplicates_{run_id}.{ext}")))
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or(OutputError::InvalidMode(normalized))
    }
}

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Unknown output mode name.
    #[error("invalid output mode '{0}'")]
    InvalidMode(String),

    /// The report file could not be created.
    #[error("couldn't create report file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report failed.
    #[error("error while writing report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV generation failed.
    #[error("error while writing report {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::CsvOutputError,
    },

    /// JSON generation failed.
    #[error("error while writing report {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: json::JsonOutputError,
    },
}

/// Local-time run id used to name report files.
#[must_use]
pub fn generate_run_id() -> String {
    Local::now().format(RUN_ID_FORMAT).to_string()
}

/// Report destination opened ahead of the scan.
#[derive(Debug)]
pub struct ReportWriter {
    mode: OutputMode,
    run_id: String,
    path: Option<PathBuf>,
}

impl ReportWriter {
    /// Create the report file for `mode` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Create` if the file can't be created.
    pub fn create(mode: OutputMode, run_id: &str) -> Result<Self, OutputError> {
        let path = mode.report_file_name(run_id);
        match path {
            Some(ref path) => Self::create_in(mode, run_id, path.clone()),
            None => Ok(Self {
                mode,
                run_id: run_id.to_string(),
                path: None,
            }),
        }
    }

    /// Create the report file at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Create` if the file can't be created.
    pub fn create_in(mode: OutputMode, run_id: &str, path: PathBuf) -> Result<Self, OutputError> {
        File::create(&path).map_err(|source| OutputError::Create {
            path: path.clone(),
            source,
        })?;
        log::debug!("Created report file {}", path.display());
        Ok(Self {
            mode,
            run_id: run_id.to_string(),
            path: Some(path),
        })
    }

    /// Report file path, `None` when writing to standard output.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the report for `result`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing fails.
    pub fn write(&self, result: &ScanResult) -> Result<(), OutputError> {
        match &self.path {
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                self.write_stdout(result, &mut lock)
            }
            Some(path) => {
                let file = File::create(path).map_err(|source| OutputError::Create {
                    path: path.clone(),
                    source,
                })?;
                self.write_file(result, path, BufWriter::new(file))?;
                log::info!("Report written to {}", path.display());
                Ok(())
            }
        }
    }

    fn write_stdout<W: Write>(&self, result: &ScanResult, writer: &mut W) -> Result<(), OutputError> {
        let to_error = |source| OutputError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        };
        writer
            .write_all(stdout_banner(&self.run_id).as_bytes())
            .map_err(to_error)?;
        TextOutput::new(&result.groups)
            .write_to(writer)
            .map_err(to_error)
    }

    fn write_file<W: Write>(
        &self,
        result: &ScanResult,
        path: &Path,
        mut writer: W,
    ) -> Result<(), OutputError> {
        match self.mode {
            OutputMode::Text | OutputMode::Stdout => TextOutput::new(&result.groups)
                .write_to(writer)
                .map_err(|source| OutputError::Write {
                    path: path.to_path_buf(),
                    source,
                }),
            OutputMode::Csv => CsvOutput::new(&result.groups, &result.all_files)
                .write_to(writer)
                .map_err(|source| OutputError::Csv {
                    path: path.to_path_buf(),
                    source,
                }),
            OutputMode::Json => JsonOutput::new(&result.groups)
                .write_to(&mut writer, false)
                .map_err(|source| OutputError::Json {
                    path: path.to_path_buf(),
                    source,
                }),
        }
    }
}
