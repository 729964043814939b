//! Command-line interface definitions for dupscan.
//!
//! # Example
//!
//! ```bash
//! # Scan two directories, write ./duplicates_<run id>.txt
//! dupscan ~/Pictures /media/backup/Pictures
//!
//! # Thorough scan, CSV report, skip files under 1 MiB
//! dupscan -t -o csv -m 1MiB ~/Downloads
//!
//! # Print the report and remove the redundant copies
//! dupscan -o stdout -X ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::exclusions::default_exclusion_examples;
use crate::size::parse_min_size;

fn exclusions_long_help() -> String {
    format!(
        "File with newline-separated file/directory names to exclude\n\n\
         Without it a built-in list is used, e.g. {}, ...",
        default_exclusion_examples(3).join(", ")
    )
}

/// Find duplicate files across directories.
///
/// Files are compared by extension, size and a content fingerprint: a
/// CRC32 over the whole file (small files) or over sampled regions (large
/// files), or SHA-256 over the entire file with --thorough.
#[derive(Debug, Parser)]
#[command(name = "dupscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to scan
    #[arg(value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// File with newline-separated file/directory names to exclude
    #[arg(short = 'x', long, value_name = "FILE", long_help = exclusions_long_help())]
    pub exclusions: Option<PathBuf>,

    /// Minimum file size to consider (default 4, i.e. 4 KiB)
    ///
    /// A bare number counts KiB. Units are also accepted: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(
        short = 'm',
        long,
        visible_alias = "minsize",
        value_name = "SIZE",
        value_parser = parse_min_size
    )]
    pub min_size: Option<u64>,

    /// Number of hashing workers (0 = processors minus one)
    #[arg(short = 'p', long, value_name = "N")]
    pub parallelism: Option<usize>,

    /// Hash entire files with SHA-256 (much slower)
    #[arg(short = 't', long)]
    pub thorough: bool,

    /// Report mode: text, csv, json or stdout (default text)
    #[arg(short = 'o', long, value_name = "MODE")]
    pub output: Option<String>,

    /// Remove duplicates after reporting, keeping the first path of each group
    #[arg(short = 'X', long)]
    pub remove: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}
