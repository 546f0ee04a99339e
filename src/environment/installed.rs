//! Installed package map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One installed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Name as the distribution spells it.
    pub name: String,
    /// Installed version string.
    pub version: String,
    /// Directory the distribution was found in.
    pub location: PathBuf,
}

impl InstalledPackage {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            location: location.into(),
        }
    }
}

/// Installed packages keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: BTreeMap<String, InstalledPackage>,
}

impl InstalledPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `package` unless its name is already present.
    ///
    /// Returns false when an earlier entry shadows it, matching import order.
    pub fn insert(&mut self, package: InstalledPackage) -> bool {
        let key = normalize_name(&package.name);
        if self.packages.contains_key(&key) {
            return false;
        }
        self.packages.insert(key, package);
        true
    }

    /// Look up a package by any spelling of its name.
    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.get(&normalize_name(name))
    }

    /// Installed version of `name`, if any.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.version.as_str())
    }

    /// Install location of `name`, if any.
    pub fn location_of(&self, name: &str) -> Option<&Path> {
        self.get(name).map(|p| p.location.as_path())
    }

    /// Packages in normalized-name order.
    pub fn iter(&self) -> impl Iterator<Item = &InstalledPackage> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages ordered by location, then name.
    pub fn sorted_by_location(&self) -> Vec<&InstalledPackage> {
        let mut sorted: Vec<_> = self.packages.values().collect();
        sorted.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| normalize_name(&a.name).cmp(&normalize_name(&b.name)))
        });
        sorted
    }
}

impl FromIterator<InstalledPackage> for InstalledPackages {
    fn from_iter<T: IntoIterator<Item = InstalledPackage>>(iter: T) -> Self {
        let mut packages = Self::new();
        for package in iter {
            packages.insert(package);
        }
        packages
    }
}

/// Normalize a distribution name: lowercase, runs of `-`, `_`, `.` become `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_folds_case_and_separators() {
        assert_eq!(normalize_name("Requirements_Parser"), "requirements-parser");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("a__-.b"), "a-b");
        assert_eq!(normalize_name("six"), "six");
    }

    #[test]
    fn lookup_ignores_spelling() {
        let packages: InstalledPackages =
            [InstalledPackage::new("Requirements_Parser", "0.2.0", "/site")]
                .into_iter()
                .collect();
        assert_eq!(packages.version_of("requirements-parser"), Some("0.2.0"));
        assert_eq!(packages.version_of("REQUIREMENTS.parser"), Some("0.2.0"));
        assert_eq!(packages.location_of("requirements_parser"), Some(Path::new("/site")));
        assert!(packages.get("docopt").is_none());
    }

    #[test]
    fn first_insert_wins() {
        let mut packages = InstalledPackages::new();
        assert!(packages.insert(InstalledPackage::new("six", "1.16.0", "/first")));
        assert!(!packages.insert(InstalledPackage::new("Six", "1.0.0", "/second")));
        assert_eq!(packages.len(), 1);
        assert_eq!(packages.version_of("six"), Some("1.16.0"));
    }

    #[test]
    fn sorted_by_location_then_name() {
        let packages: InstalledPackages = [
            InstalledPackage::new("zulu", "1", "/a"),
            InstalledPackage::new("alpha", "1", "/b"),
            InstalledPackage::new("bravo", "1", "/a"),
        ]
        .into_iter()
        .collect();
        let names: Vec<_> = packages
            .sorted_by_location()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["bravo", "zulu", "alpha"]);
    }
}
