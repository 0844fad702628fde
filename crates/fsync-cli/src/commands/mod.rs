//! Command implementations for fsync-cli

pub mod plan;
pub mod sync;

pub use plan::run_plan;
pub use sync::{run_into, run_sync};

use colored::Colorize;
use fsync_core::SyncReport;

use crate::error::Result;

/// How a finished run is reported on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Human,
    Json,
    Quiet,
}

/// Print the summary of a successful run.
pub fn print_report(report: &SyncReport, output: Output) -> Result<()> {
    match output {
        Output::Quiet => {}
        Output::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Output::Human if report.is_noop() => {
            println!("{} Already in sync ({} files checked)", "OK".green().bold(), report.files_unchanged);
        }
        Output::Human => println!("{} {}", "SYNCED".green().bold(), report),
    }
    Ok(())
}
