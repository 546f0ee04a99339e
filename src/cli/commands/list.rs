//! List command implementation.
//!
//! The `requirementz list` command prints the requirements aligned and
//! sorted by name.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::environment::InstalledProvider;
use crate::error::Result;
use crate::requirements::RequirementCollection;
use crate::ui::format::{render_requirement, RenderOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    file: PathBuf,
    installed: &'a dyn InstalledProvider,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(file: &Path, installed: &'a dyn InstalledProvider, args: ListArgs) -> Self {
        Self {
            file: file.to_path_buf(),
            installed,
            args,
        }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let records = RequirementCollection::from_file(&self.file)?;
        // Installed data is only needed for the location column.
        let installed = if self.args.location {
            Some(self.installed.load()?)
        } else {
            None
        };
        let align = records.column_widths();
        let theme = ui.theme().clone();

        for record in records.sorted() {
            let opts = RenderOptions {
                align: Some(align),
                show_location: self.args.location,
                location: installed
                    .as_ref()
                    .and_then(|packages| packages.location_of(record.name())),
                error: false,
            };
            ui.output(&render_requirement(&theme, record, &opts));
        }
        Ok(CommandResult::success())
    }
}
