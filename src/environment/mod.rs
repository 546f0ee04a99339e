//! The installed-package environment.
//!
//! Installed data is loaded once per run through an [`InstalledProvider`]
//! and passed to the commands that need it as an [`InstalledPackages`] map.
//!
//! # Modules
//!
//! - [`installed`] - installed package map and name normalization
//! - [`site_packages`] - provider that scans a Python interpreter's `sys.path`

pub mod installed;
pub mod site_packages;

pub use installed::{normalize_name, InstalledPackage, InstalledPackages};
pub use site_packages::SitePackages;

use crate::error::Result;

/// Source of installed package data.
pub trait InstalledProvider {
    /// Load every installed package.
    fn load(&self) -> Result<InstalledPackages>;
}

impl InstalledProvider for InstalledPackages {
    fn load(&self) -> Result<InstalledPackages> {
        Ok(self.clone())
    }
}
