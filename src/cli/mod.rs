//! Command-line driver: argument parsing, logging setup, commands and
//! console reporting.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod args;
mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command, OutputFormat};
pub use exit_status::ExitStatus;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for locscan itself with `-v`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,locscan=debug" } else { "warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Extract(cmd)) => commands::extract::extract(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
