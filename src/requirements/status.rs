//! Requirement status evaluation.
//!
//! Each manifest entry is checked against the installed packages and,
//! optionally, against the latest release on the package index.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::environment::{normalize_name, InstalledPackages};
use crate::error::{ReqzError, Result};
use crate::registry::PackageIndex;

use super::record::RequirementRecord;

/// Label used instead of a spec string for any-version requirements.
pub const ANY_VERSION_LABEL: &str = "installed";

/// How the installed version relates to the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// Not installed at all.
    NotInstalled,
    /// Installed, but no spec is satisfied.
    Unsatisfied,
    /// Satisfied, and the installed version is named by an inclusive spec.
    Exact,
    /// Satisfied by a range.
    Loose,
}

impl InstallState {
    pub fn is_error(&self) -> bool {
        matches!(self, InstallState::NotInstalled | InstallState::Unsatisfied)
    }

    /// Single-character marker shown between version columns.
    pub fn marker(&self) -> char {
        match self {
            InstallState::NotInstalled | InstallState::Unsatisfied => '!',
            InstallState::Exact => ' ',
            InstallState::Loose => '-',
        }
    }
}

/// How the index's latest release relates to the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestState {
    /// The first spec names the latest version.
    Exact,
    /// The latest satisfies the requirement, but a newer pin is possible.
    Behind,
    /// The latest does not satisfy the requirement.
    Unsatisfied,
    /// The index has no such package.
    NotFound,
}

impl LatestState {
    pub fn marker(&self) -> char {
        match self {
            LatestState::Exact => ' ',
            LatestState::Behind => '-',
            LatestState::Unsatisfied => '!',
            LatestState::NotFound => '?',
        }
    }
}

/// Latest-release comparison for one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestStatus {
    pub version: Option<String>,
    pub state: LatestState,
}

/// Status of one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementStatus {
    pub name: String,
    /// Spec string, or [`ANY_VERSION_LABEL`].
    pub required: String,
    pub installed_version: Option<String>,
    pub location: Option<PathBuf>,
    pub state: InstallState,
    pub latest: Option<LatestStatus>,
}

impl RequirementStatus {
    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }
}

/// Evaluates requirements for one run.
///
/// Index lookups are made at most once per package; not-found answers are
/// remembered too, other failures are not.
pub struct StatusEvaluator<'a> {
    installed: &'a InstalledPackages,
    latest: HashMap<String, Option<String>>,
}

impl<'a> StatusEvaluator<'a> {
    pub fn new(installed: &'a InstalledPackages) -> Self {
        Self {
            installed,
            latest: HashMap::new(),
        }
    }

    /// Compare `record` against the installed packages.
    pub fn evaluate(&self, record: &RequirementRecord) -> RequirementStatus {
        let package = self.installed.get(record.name());
        let required = if record.is_any_version() {
            ANY_VERSION_LABEL.to_string()
        } else {
            record.spec_string()
        };

        let state = match package {
            None => InstallState::NotInstalled,
            Some(p) if !record.satisfied_by(&p.version) => InstallState::Unsatisfied,
            Some(p) if record.pins_version(&p.version) => InstallState::Exact,
            Some(_) => InstallState::Loose,
        };

        RequirementStatus {
            name: record.name().to_string(),
            required,
            installed_version: package.map(|p| p.version.clone()),
            location: package.map(|p| p.location.clone()),
            state,
            latest: None,
        }
    }

    /// Compare `record` against the latest release on `index`.
    pub fn evaluate_latest(
        &mut self,
        record: &RequirementRecord,
        index: &dyn PackageIndex,
    ) -> Result<LatestStatus> {
        let key = normalize_name(record.name());
        let latest = match self.latest.get(&key) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = match index.release_info(record.name()) {
                    Ok(info) => Some(info.latest_version().to_string()),
                    Err(ReqzError::PackageNotFound { .. }) => None,
                    Err(err) => return Err(err),
                };
                debug!("Latest for {}: {:?}", record.name(), fetched);
                self.latest.insert(key, fetched.clone());
                fetched
            }
        };

        let state = match &latest {
            None => LatestState::NotFound,
            Some(version) if !record.satisfied_by(version) => LatestState::Unsatisfied,
            Some(version) if record.specs()[0].version == *version => LatestState::Exact,
            Some(_) => LatestState::Behind,
        };
        Ok(LatestStatus {
            version: latest,
            state,
        })
    }

    /// [`evaluate`](Self::evaluate) plus the latest-release comparison.
    pub fn evaluate_with_remote(
        &mut self,
        record: &RequirementRecord,
        index: &dyn PackageIndex,
    ) -> Result<RequirementStatus> {
        let latest = self.evaluate_latest(record, index)?;
        let mut status = self.evaluate(record);
        status.latest = Some(latest);
        Ok(status)
    }
}
