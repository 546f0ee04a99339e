//! Release metadata as served by the PyPI JSON API.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::requirements::parse_version;

/// Everything the index knows about one package.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    pub info: PackageInfo,
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
}

/// Package summary fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Latest version according to the index.
    pub version: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
}

/// One uploaded file of a release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseFile {
    #[serde(default)]
    pub filename: Option<String>,
    /// Download count; the index reports -1 when it no longer tracks it.
    #[serde(default)]
    pub downloads: i64,
    #[serde(default)]
    pub upload_time: Option<NaiveDateTime>,
}

impl ReleaseInfo {
    /// The index's latest version.
    pub fn latest_version(&self) -> &str {
        &self.info.version
    }

    /// Number of releases other than the latest.
    pub fn other_release_count(&self) -> usize {
        self.releases.len().saturating_sub(1)
    }

    /// Highest release version by version ordering.
    pub fn latest_release(&self) -> Option<&str> {
        self.releases
            .keys()
            .max_by(|a, b| parse_version(a).cmp(&parse_version(b)))
            .map(String::as_str)
    }

    /// Downloads of `version`'s first file.
    pub fn downloads_for(&self, version: &str) -> i64 {
        self.releases
            .get(version)
            .and_then(|files| files.first())
            .map_or(0, |f| f.downloads.max(0))
    }

    /// Downloads summed over every file of every release.
    pub fn total_downloads(&self) -> i64 {
        self.releases
            .values()
            .flatten()
            .map(|f| f.downloads.max(0))
            .sum()
    }

    /// Upload time of `version`'s first file.
    pub fn uploaded_at(&self, version: &str) -> Option<NaiveDateTime> {
        self.releases
            .get(version)
            .and_then(|files| files.iter().find_map(|f| f.upload_time))
    }
}

/// Drop empty and `UNKNOWN` metadata values.
pub(crate) fn known(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "UNKNOWN")
}

impl PackageInfo {
    pub fn known_summary(&self) -> Option<&str> {
        known(&self.summary)
    }

    pub fn known_author(&self) -> Option<&str> {
        known(&self.author)
    }

    pub fn known_author_email(&self) -> Option<&str> {
        known(&self.author_email)
    }

    pub fn known_home_page(&self) -> Option<&str> {
        known(&self.home_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "info": {
            "name": "docopt",
            "version": "0.6.2",
            "summary": "Pythonic argument parser, that will make you smile",
            "author": "Vladimir Keleshev",
            "author_email": "vladimir@keleshev.com",
            "home_page": "http://docopt.org"
        },
        "releases": {
            "0.6.1": [{"filename": "docopt-0.6.1.tar.gz", "downloads": 10, "upload_time": "2013-06-23T17:31:43"}],
            "0.6.2": [{"filename": "docopt-0.6.2.tar.gz", "downloads": 25, "upload_time": "2014-06-16T11:18:57"}],
            "0.10.0": [],
            "0.4.0": [{"downloads": -1}]
        }
    }"#;

    fn sample() -> ReleaseInfo {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn deserializes_pypi_json() {
        let info = sample();
        assert_eq!(info.info.name, "docopt");
        assert_eq!(info.latest_version(), "0.6.2");
        assert_eq!(info.releases.len(), 4);
        assert_eq!(info.other_release_count(), 3);
    }

    #[test]
    fn latest_release_uses_version_order() {
        assert_eq!(sample().latest_release(), Some("0.10.0"));
    }

    #[test]
    fn download_counts_ignore_untracked() {
        let info = sample();
        assert_eq!(info.downloads_for("0.6.2"), 25);
        assert_eq!(info.downloads_for("0.10.0"), 0);
        assert_eq!(info.downloads_for("0.4.0"), 0);
        assert_eq!(info.total_downloads(), 35);
    }

    #[test]
    fn upload_time_parses() {
        let info = sample();
        let uploaded = info.uploaded_at("0.6.2").unwrap();
        assert_eq!(uploaded.format("%Y-%m-%d").to_string(), "2014-06-16");
        assert!(info.uploaded_at("0.10.0").is_none());
    }

    #[test]
    fn unknown_metadata_is_hidden() {
        let info: ReleaseInfo = serde_json::from_str(
            r#"{"info": {"name": "x", "version": "1", "author": "UNKNOWN", "summary": null, "home_page": "  "}}"#,
        )
        .unwrap();
        assert!(info.info.known_author().is_none());
        assert!(info.info.known_summary().is_none());
        assert!(info.info.known_home_page().is_none());
        assert!(info.releases.is_empty());
        assert_eq!(info.other_release_count(), 0);
    }
}
