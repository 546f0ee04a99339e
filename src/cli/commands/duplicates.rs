//! Duplicates command implementation.
//!
//! The `requirementz duplicates` command reports names listed more than
//! once. The exit code is the total number of extra entries.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::requirements::RequirementCollection;
use crate::ui::format::format_duplicate;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The duplicates command implementation.
pub struct DuplicatesCommand {
    file: PathBuf,
}

impl DuplicatesCommand {
    /// Create a new duplicates command.
    pub fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
        }
    }
}

impl Command for DuplicatesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let records = RequirementCollection::from_file(&self.file)?;
        let duplicates = records.duplicates();
        if duplicates.is_empty() {
            ui.success("No duplicate requirements found.");
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        ui.message(&format!(
            "Found {} {} with duplicate entries:",
            theme.count.apply_to(duplicates.len()),
            if duplicates.len() == 1 {
                "requirement"
            } else {
                "requirements"
            }
        ));
        for (name, count) in &duplicates {
            ui.output(&format_duplicate(&theme, name, *count));
        }
        Ok(CommandResult::from_count(duplicates.values().sum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn run(content: &str) -> (MockUI, CommandResult) {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("requirements.txt");
        fs::write(&file, content).unwrap();
        let mut ui = MockUI::new();
        let result = DuplicatesCommand::new(&file).execute(&mut ui).unwrap();
        (ui, result)
    }

    #[test]
    fn reports_duplicates_with_total_exit_code() {
        let (ui, result) = run(
            "docopt>=0.6.2\ndocopt<=7.0.0\nsix>0\nsix>=1.0.0\nsix>=5.1.0\nlone==1.0.0\n",
        );

        assert_eq!(result.exit_code, 3);
        assert!(ui.has_message("Found 2 requirements with duplicate entries:"));
        assert_eq!(
            ui.outputs(),
            &[
                format!("{:>30} has 1 duplicate", "docopt"),
                format!("{:>30} has 2 duplicates", "six"),
            ]
        );
    }

    #[test]
    fn no_duplicates() {
        let (ui, result) = run("docopt\nsix\n");
        assert!(result.success);
        assert!(ui.has_success("No duplicate requirements found."));
        assert!(ui.outputs().is_empty());
    }
}
