use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init, tree::tree},
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Tree(cmd)) => tree(cmd),
        Some(Command::Init) => init(),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
