#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;

use kempt_cli::args::{CliArgs, Command};
use kempt_cli::commands;

fn main() -> Result<()> {
    // Installs a subscriber only when KEMPT_LOG or RUST_LOG is set.
    kempt_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    match args.command {
        Command::SortImports(sort_args) => {
            let report = commands::sort_imports(&sort_args, &cwd)?;
            eprint!("{}", report.lines);
            eprintln!("{}", report.summary);
            std::process::exit(report.exit_code);
        }
        Command::Options => {
            println!("{}", commands::option_schema_json()?);
            Ok(())
        }
    }
}
