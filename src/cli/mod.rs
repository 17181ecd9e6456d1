//! Command-line interface layer.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: One handler per subcommand, each returning a `CommandResult`
//! - `exit_status`: Process exit codes
//! - `report`: Cargo-style issue reports and tree rendering
//! - `run`: Command dispatch

use std::process::ExitCode;

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, verbose)?;

    Ok(ExitStatus::from_result(&result).into())
}
