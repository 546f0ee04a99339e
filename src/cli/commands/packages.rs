//! Packages command implementation.
//!
//! The `requirementz packages` command lists installed packages, sorted by
//! name or by install location.

use crate::cli::args::PackagesArgs;
use crate::environment::InstalledProvider;
use crate::error::Result;
use crate::ui::format::format_package;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The packages command implementation.
pub struct PackagesCommand<'a> {
    installed: &'a dyn InstalledProvider,
    args: PackagesArgs,
}

impl<'a> PackagesCommand<'a> {
    /// Create a new packages command.
    pub fn new(installed: &'a dyn InstalledProvider, args: PackagesArgs) -> Self {
        Self { installed, args }
    }
}

impl Command for PackagesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let packages = self.installed.load()?;
        if packages.is_empty() {
            ui.warning("No installed packages found.");
            return Ok(CommandResult::success());
        }

        let listing: Vec<_> = if self.args.location {
            packages.sorted_by_location()
        } else {
            packages.iter().collect()
        };
        let theme = ui.theme().clone();
        for package in listing {
            ui.output(&format_package(&theme, package));
        }
        ui.detail(&format!("{} installed packages", packages.len()));
        Ok(CommandResult::success())
    }
}
