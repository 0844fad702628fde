//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fsync - Keep a destination file or directory identical to a source
#[derive(Parser, Debug)]
#[command(name = "fsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print nothing on success
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the summary as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Make DESTINATION identical to SOURCE
    ///
    /// Copies new and changed files and applies the source's permission bits.
    /// Refuses to replace a non-empty directory with a single file.
    ///
    /// Examples:
    ///   fsync sync ~/backup/docs docs           # copy changes
    ///   fsync sync ~/backup/docs docs --delete  # also remove extras
    Sync {
        /// Path to make identical to SOURCE
        destination: PathBuf,

        /// Authoritative file or directory; never modified
        source: PathBuf,

        /// Remove destination entries that SOURCE lacks
        #[arg(short, long)]
        delete: bool,
    },

    /// Sync each SOURCE into DIRECTORY, keeping its base name
    ///
    /// Examples:
    ///   fsync into ~/backup docs notes/todo.txt  # ~/backup/docs, ~/backup/todo.txt
    Into {
        /// Directory receiving the sources
        directory: PathBuf,

        /// Files or directories to sync
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Remove destination entries that a source lacks
        #[arg(short, long)]
        delete: bool,
    },

    /// Run every job listed in a sync plan file (.toml, .json, .yaml)
    Plan {
        /// Path to the plan file
        #[arg(env = "FSYNC_PLAN")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify the CLI is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_command() {
        let cli = Cli::parse_from(["fsync", "sync", "dst", "src"]);
        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Sync {
                destination: "dst".into(),
                source: "src".into(),
                delete: false,
            }
        );
    }

    #[test]
    fn parse_sync_with_delete_and_global_flags() {
        let cli = Cli::parse_from(["fsync", "sync", "-d", "dst", "src", "-v", "--json"]);
        assert!(cli.verbose);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Sync { delete: true, .. }));
    }

    #[test]
    fn parse_into_command() {
        let cli = Cli::parse_from(["fsync", "into", "out", "a", "b/c", "--delete"]);
        assert_eq!(
            cli.command,
            Commands::Into {
                directory: "out".into(),
                sources: vec!["a".into(), "b/c".into()],
                delete: true,
            }
        );
    }

    #[test]
    fn into_requires_a_source() {
        assert!(Cli::try_parse_from(["fsync", "into", "out"]).is_err());
    }

    #[test]
    fn sync_requires_both_paths() {
        assert!(Cli::try_parse_from(["fsync", "sync", "dst"]).is_err());
    }

    #[test]
    fn parse_plan_command() {
        let cli = Cli::parse_from(["fsync", "-q", "plan", "jobs.toml"]);
        assert!(cli.quiet);
        assert_eq!(cli.command, Commands::Plan { file: "jobs.toml".into() });
    }
}
