//! Add command implementation.
//!
//! The `requirementz add` command adds requirement lines to the file,
//! replacing entries with the same name. A missing file is created after
//! confirmation. Nothing is written unless every line is accepted.

use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::error::{ReqzError, Result};
use crate::requirements::{AddResult, RequirementCollection, RequirementRecord};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prompt key for creating a missing requirements file.
pub const CREATE_FILE_PROMPT: &str = "create_file";

/// The add command implementation.
pub struct AddCommand {
    file: PathBuf,
    args: AddArgs,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(file: &Path, args: AddArgs) -> Self {
        Self {
            file: file.to_path_buf(),
            args,
        }
    }

    fn load_or_create(&self, ui: &mut dyn UserInterface) -> Result<RequirementCollection> {
        if self.file.exists() {
            return RequirementCollection::from_file(&self.file);
        }

        ui.warning(&format!(
            "This file doesn't exist yet: {}",
            self.file.display()
        ));
        if !ui.confirm(&Prompt::confirm(CREATE_FILE_PROMPT, "Create it?", false))? {
            return Err(ReqzError::UserCancelled);
        }
        Ok(RequirementCollection::new())
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut records = self.load_or_create(ui)?;

        let mut reports = Vec::with_capacity(self.args.lines.len());
        for line in &self.args.lines {
            let record = RequirementRecord::parse(line)?;
            let result = records.add_line(line)?;
            reports.push((record, result));
        }

        records.write(&self.file)?;

        for (record, result) in reports {
            match result {
                AddResult::Added => ui.success(&format!("Added requirement: {}", record)),
                AddResult::Replaced(previous) => {
                    ui.detail(&format!("Previous entry: {}", previous));
                    ui.success(&format!("Replaced requirement with: {}", record));
                }
            }
        }
        ui.detail(&format!("Wrote {}", self.file.display()));
        Ok(CommandResult::success())
    }
}
