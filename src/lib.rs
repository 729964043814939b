//! dupscan - duplicate file finder
//!
//! Walks one or more directory trees, fingerprints every regular file by
//! extension, size and content hash, and reports the groups of files that
//! share a fingerprint. Content hashes are a CRC32 over the whole file or
//! over three sampled regions (fast mode), or SHA-256 over the entire file
//! (thorough mode).

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod exclusions;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod size;

use std::sync::Arc;

use anyhow::Result;

use crate::actions::remove_duplicates;
use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{validate_roots, DuplicateFinder, ScanConfig};
use crate::error::{ExitCode, FindDuplicatesError};
use crate::exclusions::resolve_exclusions;
use crate::output::{generate_run_id, OutputMode, ReportWriter};
use crate::progress::Progress;

/// Run the application for parsed arguments.
///
/// # Errors
///
/// Returns an error for invalid input directories, exclusions or output
/// mode, and when the report can't be created or written. Map it to a
/// process exit code with [`ExitCode::from_error`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref());
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let roots = validate_roots(&cli.directories)?;
    let mode: OutputMode = config.output.parse()?;

    let run_id = generate_run_id();
    let report = ReportWriter::create(mode, &run_id)?;
    let exclusions = resolve_exclusions(config.exclusions_file.as_deref())?;

    let scan_config = ScanConfig::new(roots)
        .with_exclusions(exclusions)
        .with_min_size(config.min_size)
        .with_parallelism(config.effective_parallelism())
        .with_thorough(config.thorough);

    let finder =
        DuplicateFinder::new(scan_config).with_progress(Arc::new(Progress::new(cli.quiet)));
    let result = finder.find_duplicates().map_err(FindDuplicatesError)?;

    if let Some(errors) = result.error() {
        for error in errors.iter() {
            log::warn!("{}", error);
        }
        log::warn!("{} file(s) or directories couldn't be processed", errors.len());
    }

    if !result.has_duplicates() {
        if !cli.quiet {
            if result.total_files() == 0 {
                println!("No actions performed!");
            } else {
                println!("No duplicates found!");
            }
        }
        return Ok(ExitCode::Success);
    }

    if !cli.quiet {
        println!("{}", result.summary_line());
    }

    report.write(&result)?;
    if let Some(path) = report.path() {
        if !cli.quiet {
            println!("View duplicates report here: {}", path.display());
        }
    }

    if cli.remove {
        match remove_duplicates(&result.groups) {
            Ok(removal) => {
                if !cli.quiet {
                    println!("{}", removal.summary());
                }
            }
            Err(e) => {
                eprintln!("remove duplicates: {e}");
                if !cli.quiet {
                    println!("{}", e.report.summary());
                }
            }
        }
    }

    Ok(ExitCode::Success)
}
