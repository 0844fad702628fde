//! fsync CLI
//!
//! Keeps a destination file or directory identical to a source.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use fsync_core::SyncReport;

use cli::{Cli, Commands};
use commands::Output;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    let report = execute_command(&cli.command)?;
    commands::print_report(&report, output_mode(&cli))
}

fn output_mode(cli: &Cli) -> Output {
    if cli.quiet {
        Output::Quiet
    } else if cli.json {
        Output::Json
    } else {
        Output::Human
    }
}

fn execute_command(cmd: &Commands) -> Result<SyncReport> {
    match cmd {
        Commands::Sync {
            destination,
            source,
            delete,
        } => commands::run_sync(destination, source, *delete),
        Commands::Into {
            directory,
            sources,
            delete,
        } => commands::run_into(directory, sources, *delete),
        Commands::Plan { file } => commands::run_plan(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_json() {
        let cli = Cli::parse_from(["fsync", "--quiet", "--json", "plan", "p.toml"]);
        assert_eq!(output_mode(&cli), Output::Quiet);
    }

    #[test]
    fn json_output_mode() {
        let cli = Cli::parse_from(["fsync", "--json", "plan", "p.toml"]);
        assert_eq!(output_mode(&cli), Output::Json);
    }

    #[test]
    fn default_output_mode_is_human() {
        let cli = Cli::parse_from(["fsync", "plan", "p.toml"]);
        assert_eq!(output_mode(&cli), Output::Human);
    }
}
