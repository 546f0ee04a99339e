//! Search command implementation.
//!
//! The `requirementz search` command prints requirements matching a regex,
//! or with `--invert` those that do not match.

use std::path::{Path, PathBuf};

use crate::cli::args::SearchArgs;
use crate::error::Result;
use crate::requirements::RequirementCollection;
use crate::ui::format::{format_found, render_requirement, RenderOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The search command implementation.
pub struct SearchCommand {
    file: PathBuf,
    args: SearchArgs,
}

impl SearchCommand {
    /// Create a new search command.
    pub fn new(file: &Path, args: SearchArgs) -> Self {
        Self {
            file: file.to_path_buf(),
            args,
        }
    }
}

impl Command for SearchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let records = RequirementCollection::from_file(&self.file)?;
        let mut found = if self.args.invert {
            records.search_inverted(&self.args.pattern, self.args.ignore_case)?
        } else {
            records.search(&self.args.pattern, self.args.ignore_case)?
        };

        if found.is_empty() {
            ui.error(&format!("No entries found with: {}", self.args.pattern));
            return Ok(CommandResult::failure(1));
        }

        found.sort_by(|a, b| a.name().cmp(b.name()));
        let align = found.iter().fold((0, 0), |(name, spec), r| {
            (
                name.max(r.name().chars().count()),
                spec.max(r.spec_string().chars().count()),
            )
        });
        let theme = ui.theme().clone();
        let opts = RenderOptions {
            align: Some(align),
            ..Default::default()
        };
        for record in &found {
            ui.output(&render_requirement(&theme, record, &opts));
        }
        ui.message(&format_found(&theme, found.len()));
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

    fn search(pattern: &str, ignore_case: bool, invert: bool) -> Result<(MockUI, CommandResult)> {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("requirements.txt");
        fs::write(&file, "six >= 1.0\nDocopt >= 0.6.2\nrequirements-parser\n").unwrap();
        let args = SearchArgs {
            pattern: pattern.to_string(),
            ignore_case,
            invert,
        };
        let mut ui = MockUI::new();
        let result = SearchCommand::new(&file, args).execute(&mut ui)?;
        Ok((ui, result))
    }

    #[test]
    fn finds_matches() {
        let (ui, result) = search("re|six", false, false).unwrap();
        assert!(result.success);
        assert_eq!(ui.outputs().len(), 2);
        assert!(ui.outputs()[0].starts_with("requirements-parser"));
        assert!(ui.has_message("Found 2 entries."));
    }

    #[test]
    fn ignore_case() {
        let (_, result) = search("^docopt", false, false).unwrap();
        assert_eq!(result.exit_code, 1);

        let (ui, result) = search("^docopt", true, false).unwrap();
        assert!(result.success);
        assert!(ui.has_message("Found 1 entry."));
    }

    #[test]
    fn inverted() {
        let (ui, _) = search("six", false, true).unwrap();
        assert_eq!(ui.outputs().len(), 2);
        assert!(!ui.has_output("six"));
    }

    #[test]
    fn nothing_found_is_failure() {
        let (ui, result) = search("flask", false, false).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No entries found with: flask"));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let err = search("(", false, false).unwrap_err();
        assert!(matches!(err, ReqzError::InvalidPattern { .. }));
    }
}
