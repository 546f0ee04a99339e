//! Info command implementation.
//!
//! The `requirementz info` command shows package index details for the
//! given packages, or for every requirement when none are given. The exit
//! code is the number of packages that could not be looked up.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::args::InfoArgs;
use crate::environment::{InstalledPackages, InstalledProvider};
use crate::error::Result;
use crate::registry::PackageIndex;
use crate::ui::format::format_release_info;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::load_nonempty;

/// The info command implementation.
pub struct InfoCommand<'a> {
    file: PathBuf,
    installed: &'a dyn InstalledProvider,
    index: &'a dyn PackageIndex,
    args: InfoArgs,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command.
    pub fn new(
        file: &Path,
        installed: &'a dyn InstalledProvider,
        index: &'a dyn PackageIndex,
        args: InfoArgs,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            installed,
            index,
            args,
        }
    }

    fn package_names(&self, ui: &mut dyn UserInterface) -> Result<Vec<String>> {
        if !self.args.packages.is_empty() {
            return Ok(self.args.packages.clone());
        }
        Ok(match load_nonempty(ui, &self.file)? {
            Some(records) => records.names().into_iter().map(str::to_string).collect(),
            None => Vec::new(),
        })
    }
}

impl Command for InfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let names = self.package_names(ui)?;
        if names.is_empty() {
            return Ok(CommandResult::success());
        }

        // Install state is shown when available, but lookups work without it.
        let installed = self.installed.load().unwrap_or_else(|err| {
            warn!("{}", err);
            InstalledPackages::new()
        });
        let theme = ui.theme().clone();
        let mut failures = 0;

        for name in &names {
            let mut spinner = ui.start_spinner(&format!("Fetching info for {}", name));
            match self.index.release_info(name) {
                Ok(release) => {
                    spinner.finish_clear();
                    let lines =
                        format_release_info(&theme, &release, installed.version_of(name));
                    for line in lines {
                        ui.output(&line);
                    }
                }
                Err(err) => {
                    spinner.finish_error(&format!("No info for {}", name));
                    ui.error(&err.to_string());
                    failures += 1;
                }
            }
        }
        Ok(CommandResult::from_count(failures))
    }
}
