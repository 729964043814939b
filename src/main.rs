//! dupscan - entry point.

use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::process;

use clap::Parser;
use dupscan::{cli::Cli, error::ExitCode};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidNumArgs
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    dupscan::logging::init_logging(cli.verbose, cli.quiet);

    panic::set_hook(Box::new(|info| {
        eprintln!("Program exited unexpectedly. Please report the error below to the authors:");
        eprintln!("{info}");
        eprintln!("{}", Backtrace::force_capture());
    }));

    let code = match panic::catch_unwind(AssertUnwindSafe(|| dupscan::run_app(cli))) {
        Ok(Ok(code)) => code,
        Ok(Err(err)) => {
            let code = ExitCode::from_error(&err);
            eprintln!("error: {err:#}");
            code
        }
        Err(_) => ExitCode::InternalFault,
    };

    process::exit(code.as_i32());
}
