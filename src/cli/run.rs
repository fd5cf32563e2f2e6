/// Main entry point for the propdoc CLI.
///
/// Dispatches to the appropriate command handler based on the parsed arguments.
use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{aggregate::aggregate, generate::generate, init::init},
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Aggregate(cmd)) => aggregate(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
