//! Remote package index access.
//!
//! # Modules
//!
//! - [`release`] - release metadata returned by the index
//! - [`pypi`] - PyPI JSON API client

pub mod pypi;
pub mod release;

pub use pypi::PypiClient;
pub use release::{PackageInfo, ReleaseFile, ReleaseInfo};

use crate::error::Result;

/// A package index that can describe a package's releases.
pub trait PackageIndex {
    /// Fetch metadata for `name`.
    ///
    /// Returns [`ReqzError::PackageNotFound`](crate::error::ReqzError::PackageNotFound)
    /// when the index has no such package.
    fn release_info(&self, name: &str) -> Result<ReleaseInfo>;
}
