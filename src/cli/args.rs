//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Requirementz - check a requirements.txt against installed packages and PyPI.
#[derive(Debug, Parser)]
#[command(name = "requirementz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Requirements file to use (default: requirements.txt)
    #[arg(short, long, global = true, env = "REQUIREMENTZ_FILE")]
    pub file: Option<PathBuf>,

    /// Config file to load instead of the discovered ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; use defaults or REQUIREMENTZ_PROMPT_* variables
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check requirements against installed packages (default)
    Check(CheckArgs),

    /// List requirements, sorted by name
    List(ListArgs),

    /// List installed packages
    Packages(PackagesArgs),

    /// Show requirements with duplicate entries
    Duplicates,

    /// Search requirements with a regex pattern
    Search(SearchArgs),

    /// Add or replace requirements
    Add(AddArgs),

    /// Sort the requirements file by name
    Sort,

    /// Show PyPI info for packages
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Only show requirements with errors
    #[arg(short, long)]
    pub errors: bool,

    /// Print requirement lines instead of status lines
    #[arg(short, long)]
    pub requirement: bool,

    /// Show install locations
    #[arg(short = 'L', long)]
    pub location: bool,

    /// Also compare against the latest release on PyPI
    #[arg(short, long)]
    pub latest: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Show install locations
    #[arg(short = 'L', long)]
    pub location: bool,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PackagesArgs {
    /// Sort by install location instead of name
    #[arg(short = 'L', long)]
    pub location: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SearchArgs {
    /// Regex pattern matched against each requirement line
    pub pattern: String,

    /// Case-insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Show requirements that do not match
    #[arg(long)]
    pub invert: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Requirement lines, e.g. "docopt >= 0.6.2"
    #[arg(required = true)]
    pub lines: Vec<String>,
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InfoArgs {
    /// Package names (default: every requirement)
    pub packages: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["requirementz"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn check_flags() {
        let cli = Cli::try_parse_from(["requirementz", "check", "-e", "-L", "-l"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert!(args.errors);
                assert!(args.location);
                assert!(args.latest);
                assert!(!args.requirement);
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn global_file_after_subcommand() {
        let cli = Cli::try_parse_from(["requirementz", "sort", "-f", "dev.txt"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("dev.txt")));
    }

    #[test]
    fn search_args() {
        let cli = Cli::try_parse_from(["requirementz", "search", "^doc", "-i", "--invert"]).unwrap();
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.pattern, "^doc");
                assert!(args.ignore_case);
                assert!(args.invert);
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn add_requires_a_line() {
        assert!(Cli::try_parse_from(["requirementz", "add"]).is_err());
        let cli = Cli::try_parse_from(["requirementz", "add", "six>=1.0", "docopt"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.lines, vec!["six>=1.0", "docopt"]),
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn info_packages_optional() {
        let cli = Cli::try_parse_from(["requirementz", "info"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info(ref a)) if a.packages.is_empty()));
    }
}
