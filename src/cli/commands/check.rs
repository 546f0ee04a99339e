//! Check command implementation.
//!
//! The `requirementz check` command compares each requirement with the
//! installed packages and, with `--latest`, with the newest release on the
//! package index. The exit code is the number of requirements in error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::CheckArgs;
use crate::environment::InstalledProvider;
use crate::error::Result;
use crate::registry::PackageIndex;
use crate::requirements::StatusEvaluator;
use crate::ui::format::{format_status, render_requirement, RenderOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::load_nonempty;

/// The check command implementation.
pub struct CheckCommand<'a> {
    file: PathBuf,
    installed: &'a dyn InstalledProvider,
    index: &'a dyn PackageIndex,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(
        file: &Path,
        installed: &'a dyn InstalledProvider,
        index: &'a dyn PackageIndex,
        args: CheckArgs,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            installed,
            index,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(records) = load_nonempty(ui, &self.file)? else {
            return Ok(CommandResult::success());
        };
        let installed = self.installed.load()?;
        let mut evaluator = StatusEvaluator::new(&installed);
        let align = records.column_widths();
        let theme = ui.theme().clone();
        let mut errors = 0;

        for record in records.sorted() {
            let status = if self.args.latest {
                match evaluator.evaluate_with_remote(record, self.index) {
                    Ok(status) => status,
                    Err(err) => {
                        ui.error(&err.to_string());
                        errors += 1;
                        continue;
                    }
                }
            } else {
                evaluator.evaluate(record)
            };

            if status.is_error() {
                errors += 1;
            } else if self.args.errors {
                continue;
            }

            let line = if self.args.requirement {
                render_requirement(
                    &theme,
                    record,
                    &RenderOptions {
                        align: Some(align),
                        show_location: self.args.location,
                        location: status.location.as_deref(),
                        error: status.is_error(),
                    },
                )
            } else {
                format_status(&theme, &status, self.args.location)
            };
            ui.output(&line);
        }

        debug!("Checked {} requirements, {} errors", records.len(), errors);
        ui.detail(&format!(
            "Checked {} requirements in {}",
            records.len(),
            self.file.display()
        ));
        Ok(CommandResult::from_count(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{InstalledPackage, InstalledPackages};
    use crate::error::ReqzError;
    use crate::registry::{PackageInfo, ReleaseInfo};
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    struct FakeIndex;

    impl PackageIndex for FakeIndex {
        fn release_info(&self, name: &str) -> Result<ReleaseInfo> {
            match name {
                "six" => Ok(ReleaseInfo {
                    info: PackageInfo {
                        name: "six".to_string(),
                        version: "1.17.0".to_string(),
                        ..Default::default()
                    },
                    releases: Default::default(),
                }),
                "broken" => Err(ReqzError::Remote {
                    package: name.to_string(),
                    message: "HTTP 503".to_string(),
                }),
                _ => Err(ReqzError::PackageNotFound {
                    package: name.to_string(),
                }),
            }
        }
    }

    fn installed() -> InstalledPackages {
        [
            InstalledPackage::new("docopt", "0.6.2", "/site"),
            InstalledPackage::new("six", "1.16.0", "/site"),
            InstalledPackage::new("colr", "0.8.0", "/home/me/src"),
        ]
        .into_iter()
        .collect()
    }

    fn setup(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("requirements.txt");
        fs::write(&file, content).unwrap();
        (temp, file)
    }

    fn run(content: &str, args: CheckArgs) -> (MockUI, CommandResult) {
        let (_temp, file) = setup(content);
        let packages = installed();
        let cmd = CheckCommand::new(&file, &packages, &FakeIndex, args);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (ui, result)
    }

    const MANIFEST: &str = "six >= 1.0\ndocopt >= 0.6.2\ncolr >= 0.9.0\nrequests\n";

    #[test]
    fn exit_code_counts_errors() {
        let (ui, result) = run(MANIFEST, CheckArgs::default());
        assert_eq!(result.exit_code, 2);
        assert_eq!(ui.outputs().len(), 4);
    }

    #[test]
    fn lines_sorted_by_name() {
        let (ui, _) = run(MANIFEST, CheckArgs::default());
        let names: Vec<&str> = ui
            .outputs()
            .iter()
            .map(|l| l.split_whitespace().nth(1).unwrap())
            .collect();
        assert_eq!(names, vec!["colr", "docopt", "requests", "six"]);
    }

    #[test]
    fn errors_only() {
        let args = CheckArgs {
            errors: true,
            ..Default::default()
        };
        let (ui, result) = run(MANIFEST, args);
        assert_eq!(result.exit_code, 2);
        assert_eq!(ui.outputs().len(), 2);
        assert!(ui.outputs().iter().all(|l| l.starts_with("Error")));
    }

    #[test]
    fn requirement_lines() {
        let args = CheckArgs {
            requirement: true,
            errors: true,
            ..Default::default()
        };
        let (ui, _) = run(MANIFEST, args);
        assert_eq!(ui.outputs()[0], "colr     >= 0.9.0");
        assert_eq!(ui.outputs()[1], "requests > 0");
    }

    #[test]
    fn location_column() {
        let args = CheckArgs {
            location: true,
            ..Default::default()
        };
        let (ui, _) = run(MANIFEST, args);
        assert!(ui.outputs()[0].ends_with("/home/me/src"));
        assert!(ui.outputs()[2].ends_with("(not installed)"));
    }

    #[test]
    fn latest_column_and_remote_failures() {
        let args = CheckArgs {
            latest: true,
            ..Default::default()
        };
        let (ui, result) = run("six >= 1.0\nbroken\nnothere\n", args);
        assert!(ui.has_output("- pypi: 1.17.0"));
        assert!(ui.has_output("? pypi: not found"));
        assert!(ui.has_error("HTTP 503"));
        // broken and nothere are both missing locally; broken also failed remotely
        assert_eq!(result.exit_code, 2);
        assert_eq!(ui.outputs().len(), 2);
    }

    #[test]
    fn empty_file_is_a_notice() {
        let (ui, result) = run("# comments only\n", CheckArgs::default());
        assert!(result.success);
        assert!(ui.has_warning("empty"));
        assert!(ui.outputs().is_empty());
    }

    #[test]
    fn verbose_detail() {
        let (_temp, file) = setup("six\n");
        let packages = installed();
        let cmd = CheckCommand::new(&file, &packages, &FakeIndex, CheckArgs::default());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        cmd.execute(&mut ui).unwrap();
        assert!(ui.details()[0].starts_with("Checked 1 requirements"));
    }

    #[test]
    fn missing_file_propagates() {
        let temp = TempDir::new().unwrap();
        let packages = installed();
        let cmd = CheckCommand::new(
            &temp.path().join("nope.txt"),
            &packages,
            &FakeIndex,
            CheckArgs::default(),
        );
        let mut ui = MockUI::new();
        assert!(matches!(
            cmd.execute(&mut ui),
            Err(ReqzError::FileNotFound { .. })
        ));
    }
}
