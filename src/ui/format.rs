//! Text rendering for requirements, statuses, packages and release info.
//!
//! Everything here returns plain `String`s styled through a [`ReqzTheme`];
//! with [`ReqzTheme::plain`] the output is the exact column layout printed
//! by the commands. Column padding measures visible width, so styled and
//! plain output line up the same way.

use std::path::Path;

use console::{pad_str, Alignment};

use crate::environment::InstalledPackage;
use crate::registry::ReleaseInfo;
use crate::requirements::{
    InstallState, LatestState, RequirementRecord, RequirementSource, RequirementStatus,
};

use super::theme::ReqzTheme;

const STATE_WIDTH: usize = 5;
const NAME_WIDTH: usize = 30;
const INSTALLED_WIDTH: usize = 13;
const REQUIRED_WIDTH: usize = 12;
const LATEST_WIDTH: usize = 10;
const PACKAGE_VERSION_WIDTH: usize = 12;
const INFO_WIDTH: usize = 76;
const INDENT: &str = "    ";
const NOT_INSTALLED: &str = "(not installed)";

/// How a single requirement line is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Name and spec column widths.
    pub align: Option<(usize, usize)>,
    /// Append the install location (or a not-installed marker).
    pub show_location: bool,
    pub location: Option<&'a Path>,
    /// Style the name and versions as errors.
    pub error: bool,
}

fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

fn pad_right(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Right, None).into_owned()
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn location_text(theme: &ReqzTheme, location: Option<&Path>) -> String {
    match location {
        Some(path) => theme.location.apply_to(path.display()).to_string(),
        None => theme.dim.apply_to(NOT_INSTALLED).to_string(),
    }
}

/// Render one requirement as a manifest-style line.
pub fn render_requirement(
    theme: &ReqzTheme,
    record: &RequirementRecord,
    opts: &RenderOptions<'_>,
) -> String {
    let name_style = if opts.error {
        &theme.name_error
    } else {
        &theme.name
    };
    let version_style = if opts.error {
        &theme.version_error
    } else {
        &theme.version
    };
    let editable = |flag: bool| {
        if flag {
            format!("{} ", theme.label.apply_to("-e"))
        } else {
            String::new()
        }
    };

    let mut line = match record.source() {
        RequirementSource::LocalPath { path, editable: e } => {
            format!("{}{}", editable(*e), name_style.apply_to(path))
        }
        RequirementSource::VersionControl {
            uri,
            revision,
            editable: e,
        } => {
            let revision = revision
                .as_ref()
                .map(|rev| format!("@{}", version_style.apply_to(rev)))
                .unwrap_or_default();
            format!(
                "{}{}{}{}{}",
                editable(*e),
                theme.dim.apply_to(uri),
                revision,
                theme.label.apply_to("#egg="),
                name_style.apply_to(record.name())
            )
        }
        RequirementSource::Plain => {
            let mut name = name_style.apply_to(record.name()).to_string();
            if !record.extras().is_empty() {
                name.push_str(&theme.label.apply_to(record.extras_string()).to_string());
            }
            let specs = record
                .specs()
                .iter()
                .map(|spec| {
                    format!(
                        "{} {}",
                        theme.dim.apply_to(spec.op),
                        version_style.apply_to(&spec.version)
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            match opts.align {
                Some((name_width, spec_width)) => {
                    format!("{} {}", pad(&name, name_width), pad(&specs, spec_width))
                }
                None => format!("{} {}", name, specs),
            }
        }
    };

    if opts.show_location {
        line.push(' ');
        line.push_str(&location_text(theme, opts.location));
    }
    line.trim_end().to_string()
}

/// Render a `check` status line.
pub fn format_status(theme: &ReqzTheme, status: &RequirementStatus, show_location: bool) -> String {
    let error = status.is_error();
    let verbose = if error {
        theme.error.apply_to("Error")
    } else {
        theme.success.apply_to("Ok")
    };
    let name = if error {
        theme.name_error.apply_to(&status.name)
    } else {
        theme.name.apply_to(&status.name)
    };
    let installed = match &status.installed_version {
        Some(version) if status.state == InstallState::Unsatisfied => theme
            .version_error
            .apply_to(format!("v. {}", version))
            .to_string(),
        Some(version) => theme.version.apply_to(format!("v. {}", version)).to_string(),
        None => theme.error.apply_to("not installed").to_string(),
    };
    let marker = match status.state {
        InstallState::Loose => theme.loose.apply_to(status.state.marker()),
        _ => theme.error.apply_to(status.state.marker()),
    };
    let required = if error {
        theme.version_error.apply_to(&status.required)
    } else {
        theme.version.apply_to(&status.required)
    };

    let mut line = format!(
        "{} {} {} {} {}",
        pad(&verbose.to_string(), STATE_WIDTH),
        pad(&name.to_string(), NAME_WIDTH),
        pad(&installed, INSTALLED_WIDTH),
        marker,
        pad(&required.to_string(), REQUIRED_WIDTH),
    );

    if let Some(latest) = &status.latest {
        let marker = match latest.state {
            LatestState::Behind => theme.loose.apply_to(latest.state.marker()),
            _ => theme.error.apply_to(latest.state.marker()),
        };
        let version = match &latest.version {
            Some(version) => theme.remote.apply_to(version.as_str()).to_string(),
            None => theme.error.apply_to("not found").to_string(),
        };
        line.push_str(&format!(
            " {} {} {}",
            marker,
            theme.label.apply_to("pypi:"),
            pad(&version, LATEST_WIDTH)
        ));
    }

    if show_location {
        line.push(' ');
        line.push_str(&location_text(theme, status.location.as_deref()));
    }
    line.trim_end().to_string()
}

/// Render an installed package line.
pub fn format_package(theme: &ReqzTheme, package: &InstalledPackage) -> String {
    format!(
        "{} v. {} {}",
        pad(&theme.name.apply_to(&package.name).to_string(), NAME_WIDTH),
        pad(
            &theme.version.apply_to(&package.version).to_string(),
            PACKAGE_VERSION_WIDTH
        ),
        theme.location.apply_to(package.location.display())
    )
    .trim_end()
    .to_string()
}

/// Render one `duplicates` entry.
pub fn format_duplicate(theme: &ReqzTheme, name: &str, count: usize) -> String {
    format!(
        "{} has {} {}",
        pad_right(&theme.name.apply_to(name).to_string(), NAME_WIDTH),
        theme.count.apply_to(count),
        plural(count, "duplicate", "duplicates")
    )
}

/// `Found N entries.` summary for search results.
pub fn format_found(theme: &ReqzTheme, count: usize) -> String {
    format!(
        "Found {} {}.",
        theme.count.apply_to(count),
        plural(count, "entry", "entries")
    )
}

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the `info` block for one package.
///
/// `installed` is the locally installed version, if any. The block starts
/// with a blank separator line.
pub fn format_release_info(
    theme: &ReqzTheme,
    release: &ReleaseInfo,
    installed: Option<&str>,
) -> Vec<String> {
    let info = &release.info;
    let mut lines = vec![String::new()];

    let mut header = format!(
        "{} {}",
        pad(&theme.name.apply_to(&info.name).to_string(), NAME_WIDTH),
        pad(
            &theme.version.apply_to(release.latest_version()).to_string(),
            LATEST_WIDTH
        )
    );
    let others = release.other_release_count();
    if others > 0 {
        header.push_str(&format!(
            " (+{} {})",
            theme.count.apply_to(others),
            plural(others, "release", "releases")
        ));
    }
    lines.push(header.trim_end().to_string());

    if let Some(summary) = info.known_summary() {
        for line in wrap_text(summary, INFO_WIDTH - INDENT.len()) {
            lines.push(format!("{}{}", INDENT, line));
        }
    }

    let email = info
        .known_author_email()
        .map(|e| theme.dim.apply_to(format!("<{}>", e)).to_string());
    let author = match (info.known_author(), email) {
        (Some(author), Some(email)) => Some(format!("{} {}", author, email)),
        (Some(author), None) => Some(author.to_string()),
        (None, Some(email)) => Some(email),
        (None, None) => None,
    };
    if let Some(author) = author {
        lines.push(format!("{}{} {}", INDENT, theme.label.apply_to("Author:"), author));
    }

    if let Some(home) = info.known_home_page() {
        lines.push(format!(
            "{}{} {}",
            INDENT,
            theme.label.apply_to("Homepage:"),
            theme.location.apply_to(home)
        ));
    }

    if let Some(latest) = release.latest_release() {
        let state = match installed {
            None => theme.error.apply_to("(not installed)".to_string()),
            Some(v) if v == latest => theme.success.apply_to("(installed)".to_string()),
            Some(v) => theme.warning.apply_to(format!("(installed: {})", v)),
        };
        lines.push(format!(
            "{}{} {} ({} dls, {} for all versions) {}",
            INDENT,
            theme.label.apply_to("Latest:"),
            theme.version.apply_to(latest),
            theme.count.apply_to(release.downloads_for(latest)),
            theme.count.apply_to(release.total_downloads()),
            state
        ));
        if let Some(uploaded) = release.uploaded_at(latest) {
            lines.push(format!(
                "{}{} {}",
                INDENT,
                theme.label.apply_to("Released:"),
                uploaded.format("%Y-%m-%d")
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PackageInfo, ReleaseFile};
    use crate::requirements::{LatestStatus, ANY_VERSION_LABEL};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn record(line: &str) -> RequirementRecord {
        RequirementRecord::parse(line).unwrap()
    }

    fn status(state: InstallState, installed: Option<&str>) -> RequirementStatus {
        RequirementStatus {
            name: "docopt".to_string(),
            required: ">= 0.6.2".to_string(),
            installed_version: installed.map(str::to_string),
            location: installed.map(|_| PathBuf::from("/site")),
            state,
            latest: None,
        }
    }

    #[test]
    fn renders_plain_requirement() {
        let theme = ReqzTheme::plain();
        let line = render_requirement(
            &theme,
            &record("Colr[tests,docs]>=0.9,<=1.0"),
            &RenderOptions::default(),
        );
        assert_eq!(line, "Colr[tests, docs] >= 0.9,<= 1.0");
        assert_eq!(RequirementRecord::parse(&line).unwrap(), record("colr[tests,docs]>=0.9,<=1.0"));
    }

    #[test]
    fn renders_aligned_columns() {
        let theme = ReqzTheme::plain();
        let opts = RenderOptions {
            align: Some((8, 10)),
            ..Default::default()
        };
        let line = render_requirement(&theme, &record("six>=1.0"), &opts);
        assert_eq!(line, format!("{:<8} {}", "six", ">= 1.0"));
    }

    #[test]
    fn renders_location_or_marker() {
        let theme = ReqzTheme::plain();
        let installed = RenderOptions {
            show_location: true,
            location: Some(Path::new("/site")),
            ..Default::default()
        };
        assert_eq!(
            render_requirement(&theme, &record("six >= 1.0"), &installed),
            "six >= 1.0 /site"
        );

        let missing = RenderOptions {
            show_location: true,
            ..Default::default()
        };
        assert_eq!(
            render_requirement(&theme, &record("six >= 1.0"), &missing),
            "six >= 1.0 (not installed)"
        );
    }

    #[test]
    fn renders_editable_and_vcs_verbatim() {
        let theme = ReqzTheme::plain();
        let opts = RenderOptions::default();
        for line in [
            "-e ./src/colr",
            "-e git+https://github.com/welbornprod/colr.git@v0.9.1#egg=colr",
            "git+https://example.com/repo.git#egg=thing",
        ] {
            assert_eq!(render_requirement(&theme, &record(line), &opts), line);
        }
    }

    #[test]
    fn styled_output_keeps_text() {
        let theme = ReqzTheme::new();
        let line = render_requirement(&theme, &record("six >= 1.0"), &RenderOptions::default());
        assert_eq!(console::strip_ansi_codes(&line), "six >= 1.0");
    }

    #[test]
    fn status_line_columns() {
        let theme = ReqzTheme::plain();
        let line = format_status(&theme, &status(InstallState::Exact, Some("0.6.2")), false);
        let expected = format!(
            "{:<5} {:<30} {:<13} {} {}",
            "Ok", "docopt", "v. 0.6.2", ' ', ">= 0.6.2"
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn status_line_errors_and_location() {
        let theme = ReqzTheme::plain();
        let line = format_status(&theme, &status(InstallState::NotInstalled, None), true);
        let expected = format!(
            "{:<5} {:<30} {:<13} {} {:<12} {}",
            "Error", "docopt", "not installed", '!', ">= 0.6.2", "(not installed)"
        );
        assert_eq!(line, expected);

        let loose = format_status(&theme, &status(InstallState::Loose, Some("0.7.0")), true);
        assert!(loose.contains("v. 0.7.0      - >= 0.6.2"));
        assert!(loose.ends_with("/site"));
    }

    #[test]
    fn status_line_latest_column() {
        let theme = ReqzTheme::plain();
        let mut s = status(InstallState::Loose, Some("0.6.2"));
        s.required = ANY_VERSION_LABEL.to_string();
        s.latest = Some(LatestStatus {
            version: Some("0.7.0".to_string()),
            state: LatestState::Behind,
        });
        let line = format_status(&theme, &s, false);
        assert!(line.ends_with(&format!("{:<12} - pypi: 0.7.0", "installed")), "{}", line);

        s.latest = Some(LatestStatus {
            version: None,
            state: LatestState::NotFound,
        });
        let line = format_status(&theme, &s, false);
        assert!(line.ends_with("? pypi: not found"), "{}", line);
    }

    #[test]
    fn package_and_duplicate_lines() {
        let theme = ReqzTheme::plain();
        let package = InstalledPackage::new("six", "1.16.0", "/site");
        assert_eq!(
            format_package(&theme, &package),
            format!("{:<30} v. {:<12} {}", "six", "1.16.0", "/site")
        );
        assert_eq!(
            format_duplicate(&theme, "docopt", 1),
            format!("{:>30} has 1 duplicate", "docopt")
        );
        assert_eq!(
            format_duplicate(&theme, "six", 2),
            format!("{:>30} has 2 duplicates", "six")
        );
    }

    #[test]
    fn found_summary_pluralizes() {
        let theme = ReqzTheme::plain();
        assert_eq!(format_found(&theme, 1), "Found 1 entry.");
        assert_eq!(format_found(&theme, 3), "Found 3 entries.");
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(wrap_text("   ", 10).is_empty());
        assert_eq!(wrap_text("supercalifragilistic x", 5), vec!["supercalifragilistic", "x"]);
    }

    fn docopt_release() -> ReleaseInfo {
        let file = |downloads: i64, time: &str| ReleaseFile {
            filename: None,
            downloads,
            upload_time: Some(time.parse().unwrap()),
        };
        let mut releases = BTreeMap::new();
        releases.insert("0.6.1".to_string(), vec![file(100, "2013-05-01T10:00:00")]);
        releases.insert("0.6.2".to_string(), vec![file(25, "2014-06-16T11:18:57")]);
        ReleaseInfo {
            info: PackageInfo {
                name: "docopt".to_string(),
                version: "0.6.2".to_string(),
                summary: Some("Pythonic argument parser, that will make you smile".to_string()),
                author: Some("Vladimir Keleshev".to_string()),
                author_email: Some("vladimir@keleshev.com".to_string()),
                home_page: Some("http://docopt.org".to_string()),
            },
            releases,
        }
    }

    #[test]
    fn release_info_block() {
        let theme = ReqzTheme::plain();
        let lines = format_release_info(&theme, &docopt_release(), Some("0.6.2"));
        assert_eq!(lines[0], "");
        insta::assert_snapshot!(lines[1..].join("\n"), @r"
        docopt                         0.6.2      (+1 release)
            Pythonic argument parser, that will make you smile
            Author: Vladimir Keleshev <vladimir@keleshev.com>
            Homepage: http://docopt.org
            Latest: 0.6.2 (25 dls, 125 for all versions) (installed)
            Released: 2014-06-16
        ");
    }

    #[test]
    fn release_info_install_states() {
        let theme = ReqzTheme::plain();
        let release = docopt_release();
        let missing = format_release_info(&theme, &release, None);
        assert!(missing.iter().any(|l| l.ends_with("(not installed)")));
        let older = format_release_info(&theme, &release, Some("0.6.1"));
        assert!(older.iter().any(|l| l.ends_with("(installed: 0.6.1)")));
    }

    #[test]
    fn release_info_skips_unknown_fields() {
        let theme = ReqzTheme::plain();
        let release = ReleaseInfo {
            info: PackageInfo {
                name: "bare".to_string(),
                version: "1.0".to_string(),
                summary: Some("UNKNOWN".to_string()),
                ..Default::default()
            },
            releases: BTreeMap::new(),
        };
        let lines = format_release_info(&theme, &release, None);
        assert_eq!(lines, vec![String::new(), format!("{:<30} {}", "bare", "1.0")]);
    }
}
