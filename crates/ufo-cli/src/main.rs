use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    find::{self, FindArgs},
    hash::{self, HashArgs},
    show::{self, ShowArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "ufo-vertex", about = "Feynman-rule vertex registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a model file and print the load report.
    Check(CheckArgs),
    /// List vertices whose particle content matches a multiset of names.
    Find(FindArgs),
    /// Print one vertex in raw record form.
    Show(ShowArgs),
    /// Print the canonical hash of the loaded vertex table.
    Hash(HashArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => check::run(&args),
        Command::Find(args) => find::run(&args),
        Command::Show(args) => show::run(&args),
        Command::Hash(args) => hash::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
