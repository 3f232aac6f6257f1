//! CLI module
//!
//! Provides the command-line interface:
//! - init: write a default config file and an empty data file
//! - start: boot the service and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, start};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
