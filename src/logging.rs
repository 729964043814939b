//! Logging setup: `log` facade, `env_logger` backend.
//!
//! Level selection, first match wins:
//!
//! 1. `RUST_LOG` if set
//! 2. `--quiet`: errors only
//! 3. `-vv`: trace, `-v`: debug
//! 4. info
//!
//! Debug builds prefix records with a timestamp, and with the module path
//! when verbose; release builds print level and message only.

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize logging once for the process.
///
/// Later calls are ignored with a debug record instead of panicking, so tests
/// and embedders may call it freely.
///
/// ```rust,no_run
/// dupscan::logging::init_logging(1, false);
/// log::debug!("visible at -v");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = env::var_os("RUST_LOG").is_some();
    let mut builder = Builder::new();

    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }
    apply_format(&mut builder, verbose);

    match builder.try_init() {
        Ok(()) if from_env => log::debug!("Log filter taken from RUST_LOG"),
        Ok(()) => log::debug!("Logging at level {}", level_for(verbose, quiet)),
        Err(e) => log::debug!("Logger already initialized: {}", e),
    }
}

/// Level implied by the command-line flags.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

#[cfg(debug_assertions)]
fn apply_format(builder: &mut Builder, verbose: u8) {
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        let timestamp = buf.timestamp_seconds();
        if verbose > 0 {
            writeln!(
                buf,
                "{timestamp} {style}{:<5}{style:#} [{}] {}",
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{timestamp} {style}{:<5}{style:#} {}",
                record.level(),
                record.args()
            )
        }
    });
}

#[cfg(not(debug_assertions))]
fn apply_format(builder: &mut Builder, _verbose: u8) {
    builder.format(|buf, record| {
        let style = buf.default_level_style(record.level());
        writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
    });
}
