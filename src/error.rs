//! Exit codes and the mapping from application errors to them.

use crate::duplicates::FinderError;
use crate::exclusions::ExclusionsError;
use crate::output::OutputError;

/// Exit codes for the dupscan binary.
///
/// - 0: Success (including "no duplicates found")
/// - 1: No input directory (or unusable arguments)
/// - 2: Exclusions path is not a readable file
/// - 3: An input directory is missing or unreadable
/// - 4: Exclusions file couldn't be read
/// - 5: The scan itself failed
/// - 6: Text report couldn't be written
/// - 7: Unknown output mode
/// - 8: Report file couldn't be created
/// - 9: CSV/JSON report couldn't be written
/// - 101: Unexpected internal fault (panic)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Completed normally.
    Success = 0,
    /// No input directories, or arguments couldn't be parsed.
    InvalidNumArgs = 1,
    /// Exclusions path is not a readable file.
    InvalidExclusions = 2,
    /// An input directory is not a readable directory.
    InputDirectoryNotReadable = 3,
    /// Exclusions file couldn't be read.
    ExclusionsFileError = 4,
    /// Error while finding duplicates.
    ErrorFindingDuplicates = 5,
    /// Error while writing the text report.
    ErrorCreatingReport = 6,
    /// Unknown output mode.
    InvalidOutputMode = 7,
    /// Report file couldn't be created.
    ReportFileCreationFailed = 8,
    /// Writing the CSV or JSON report failed.
    WritingToReportFileFailed = 9,
    /// A panic escaped to the program boundary.
    InternalFault = 101,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Pick the exit code for an application error.
    ///
    /// The first recognised error in the cause chain decides; anything
    /// unrecognised is treated as an argument problem.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.is::<FindDuplicatesError>() {
                return Self::ErrorFindingDuplicates;
            }
            if let Some(e) = cause.downcast_ref::<FinderError>() {
                return match e {
                    FinderError::NoInputPaths => Self::InvalidNumArgs,
                    _ => Self::InputDirectoryNotReadable,
                };
            }
            if let Some(e) = cause.downcast_ref::<ExclusionsError>() {
                return match e {
                    ExclusionsError::NotAFile(_) => Self::InvalidExclusions,
                    ExclusionsError::Read { .. } => Self::ExclusionsFileError,
                };
            }
            if let Some(e) = cause.downcast_ref::<OutputError>() {
                return match e {
                    OutputError::InvalidMode(_) => Self::InvalidOutputMode,
                    OutputError::Create { .. } => Self::ReportFileCreationFailed,
                    OutputError::Write { .. } => Self::ErrorCreatingReport,
                    OutputError::Csv { .. } | OutputError::Json { .. } => {
                        Self::WritingToReportFileFailed
                    }
                };
            }
        }
        Self::InvalidNumArgs
    }
}

/// A scan that passed validation but still failed.
#[derive(Debug, thiserror::Error)]
#[error("error while finding duplicates: {0}")]
pub struct FindDuplicatesError(#[from] pub FinderError);
