use argh::FromArgs;

mod commands;
pub mod common;
pub mod error;

use crate::commands::{
    generate::GenerateCommand, inspect::InspectCommand, restore::RestoreCommand,
};
use error::CliError;

#[derive(FromArgs)]
/// Entropy Grid Backup. Hide a seed phrase in a grid of decoy words, keyed by a pattern
struct EntgridCli {
    #[argh(subcommand)]
    cmd: SubCommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Generate(GenerateCommand),
    Restore(RestoreCommand),
    Inspect(InspectCommand),
}

fn run(args: EntgridCli) -> Result<(), CliError> {
    match args.cmd {
        SubCommand::Generate(generate_command) => generate_command.execute(),
        SubCommand::Restore(restore_command) => restore_command.execute(),
        SubCommand::Inspect(inspect_command) => inspect_command.execute(),
    }
}

fn main() {
    pretty_env_logger::init();
    // Parse command-line arguments
    let args: EntgridCli = argh::from_env();

    if let Err(err) = run(args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
