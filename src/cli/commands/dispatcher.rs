//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::Settings;
use crate::environment::{InstalledProvider, SitePackages};
use crate::error::Result;
use crate::registry::{PackageIndex, PypiClient};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit with the number of problems found, 0 meaning success.
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::success()
        } else {
            Self::failure(i32::try_from(count).unwrap_or(i32::MAX))
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Holds the resolved settings and the two data sources commands read from:
/// installed packages and the package index.
pub struct CommandDispatcher {
    settings: Settings,
    installed: Box<dyn InstalledProvider>,
    index: Box<dyn PackageIndex>,
}

impl CommandDispatcher {
    /// Create a dispatcher backed by the configured interpreter and index.
    pub fn new(settings: Settings) -> Result<Self> {
        let installed =
            SitePackages::new(settings.python.clone()).with_dirs(settings.site_packages.clone());
        let index = PypiClient::new(settings.index_url.clone(), settings.timeout)?;
        Ok(Self::with_sources(settings, Box::new(installed), Box::new(index)))
    }

    /// Create a dispatcher with explicit data sources.
    pub fn with_sources(
        settings: Settings,
        installed: Box<dyn InstalledProvider>,
        index: Box<dyn PackageIndex>,
    ) -> Self {
        Self {
            settings,
            installed,
            index,
        }
    }

    /// Get the resolved settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand runs `check` with default flags.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let file = self.settings.file.as_path();
        let installed = &*self.installed;
        let index = &*self.index;

        match &cli.command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(file, installed, index, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(file, installed, args.clone()).execute(ui)
            }
            Some(Commands::Packages(args)) => {
                super::packages::PackagesCommand::new(installed, args.clone()).execute(ui)
            }
            Some(Commands::Duplicates) => {
                super::duplicates::DuplicatesCommand::new(file).execute(ui)
            }
            Some(Commands::Search(args)) => {
                super::search::SearchCommand::new(file, args.clone()).execute(ui)
            }
            Some(Commands::Add(args)) => {
                super::add::AddCommand::new(file, args.clone()).execute(ui)
            }
            Some(Commands::Sort) => super::sort::SortCommand::new(file).execute(ui),
            Some(Commands::Info(args)) => {
                super::info::InfoCommand::new(file, installed, index, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::check::CheckCommand::new(file, installed, index, CheckArgs::default())
                .execute(ui),
        }
    }
}
