//! Sort command implementation.
//!
//! The `requirementz sort` command rewrites the file sorted by name.
//! Comments, blank lines and pip option lines are not kept.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::requirements::RequirementCollection;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The sort command implementation.
pub struct SortCommand {
    file: PathBuf,
}

impl SortCommand {
    /// Create a new sort command.
    pub fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
        }
    }
}

impl Command for SortCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let records = RequirementCollection::from_file(&self.file)?;
        records.write(&self.file)?;
        ui.success(&format!(
            "Sorted requirements file: {}",
            self.file.display()
        ));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReqzError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sorts_in_ordinal_order() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("requirements.txt");
        fs::write(
            &file,
            "six >= 0.1.1\n# tools\nanti-gravity > 0\n\ndocopt >= 0.6.2\ncolr >= 0.2.5\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        let result = SortCommand::new(&file).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Sorted requirements file"));
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "anti-gravity > 0\ncolr >= 0.2.5\ndocopt >= 0.6.2\nsix >= 0.1.1\n"
        );
        assert!(!temp.path().join("requirements.txt.bak").exists());
    }

    #[test]
    fn parse_failure_keeps_original() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("requirements.txt");
        fs::write(&file, "six\ndocopt >>= 1\n").unwrap();
        let mut ui = MockUI::new();

        let err = SortCommand::new(&file).execute(&mut ui).unwrap_err();

        assert!(matches!(err, ReqzError::Parse { .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "six\ndocopt >>= 1\n");
    }
}
