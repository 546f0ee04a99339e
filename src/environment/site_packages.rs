//! Installed packages discovered from a Python interpreter's import path.
//!
//! The interpreter is asked for its `sys.path`; every directory on it is
//! scanned for `*.dist-info/METADATA` and `*.egg-info/PKG-INFO` files.
//! Extra directories from configuration are scanned after the interpreter's.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context};
use tracing::{debug, warn};

use crate::error::{ReqzError, Result};

use super::installed::{InstalledPackage, InstalledPackages};
use super::InstalledProvider;

const SYS_PATH_SCRIPT: &str = "import sys, json; print(json.dumps(sys.path))";

/// Provider backed by a Python interpreter and its site-packages directories.
#[derive(Debug, Clone)]
pub struct SitePackages {
    python: String,
    extra_dirs: Vec<PathBuf>,
}

impl SitePackages {
    /// Use `python` to discover the import path.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            extra_dirs: Vec::new(),
        }
    }

    /// Also scan `dirs`.
    pub fn with_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.extra_dirs = dirs;
        self
    }

    /// Directories on the interpreter's `sys.path`.
    fn interpreter_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let output = Command::new(&self.python)
            .arg("-c")
            .arg(SYS_PATH_SCRIPT)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to run {}", self.python))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.python,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let paths: Vec<String> = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("Unexpected sys.path output from {}", self.python))?;

        Ok(paths
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

impl InstalledProvider for SitePackages {
    fn load(&self) -> Result<InstalledPackages> {
        let mut dirs = match self.interpreter_paths() {
            Ok(dirs) => dirs,
            Err(err) if !self.extra_dirs.is_empty() => {
                warn!("Could not query {}: {:#}", self.python, err);
                Vec::new()
            }
            Err(err) => {
                return Err(ReqzError::PackageListing {
                    message: format!("{:#}", err),
                })
            }
        };
        dirs.extend(self.extra_dirs.iter().cloned());

        let mut packages = InstalledPackages::new();
        for dir in dirs.iter().filter(|d| d.is_dir()) {
            scan_dir(dir, &mut packages);
        }
        debug!("Found {} installed packages", packages.len());
        Ok(packages)
    }
}

/// Add every distribution found directly under `dir` to `packages`.
pub fn scan_dir(dir: &Path, packages: &mut InstalledPackages) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("Skipping {}: {}", dir.display(), err);
            return;
        }
    };

    let mut found: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    found.sort();

    for path in found {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let metadata = if file_name.ends_with(".dist-info") {
            path.join("METADATA")
        } else if file_name.ends_with(".egg-info") {
            if path.is_dir() {
                path.join("PKG-INFO")
            } else {
                path.clone()
            }
        } else {
            continue;
        };

        match read_metadata(&metadata, file_name) {
            Some((name, version)) => {
                packages.insert(InstalledPackage::new(name, version, dir));
            }
            None => debug!("No usable metadata in {}", path.display()),
        }
    }
}

/// Read `Name:` and `Version:` headers, falling back to the directory name.
fn read_metadata(path: &Path, dir_name: &str) -> Option<(String, String)> {
    let content = fs::read_to_string(path).ok();
    let (mut name, mut version) = (None, None);

    if let Some(content) = &content {
        for line in content.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.strip_prefix("Name:") {
                name.get_or_insert_with(|| value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("Version:") {
                version.get_or_insert_with(|| value.trim().to_string());
            }
        }
    }

    let fallback = parse_dist_dir_name(dir_name);
    let name = name
        .filter(|n| !n.is_empty())
        .or_else(|| fallback.as_ref().map(|(n, _)| n.clone()))?;
    let version = version
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.map(|(_, v)| v))?;
    Some((name, version))
}

/// Split `name-1.0.dist-info` (or `.egg-info`) into name and version.
fn parse_dist_dir_name(dir_name: &str) -> Option<(String, String)> {
    let stem = dir_name
        .strip_suffix(".dist-info")
        .or_else(|| dir_name.strip_suffix(".egg-info"))?;
    let (name, rest) = stem.split_once('-')?;
    // egg-info names may carry a -pyX.Y suffix.
    let version = rest.split('-').next().unwrap_or(rest);
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name.to_string(), version.to_string()))
}
