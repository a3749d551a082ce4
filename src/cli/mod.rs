//! Command-line interface: argument parsing, command dispatch and report output.

pub mod args;
mod commands;
mod exit_status;
mod report;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::{describe::describe, fix::fix, init::init};

/// Runs the parsed command. Prints help when no command is given.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Fix(cmd)) => fix(cmd),
        Some(Command::Describe) => describe(),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}
