//! Config file schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of one config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Requirements file to operate on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Package index JSON API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,

    /// Interpreter asked for its `sys.path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Extra directories scanned for installed packages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub site_packages: Vec<PathBuf>,

    /// HTTP timeout for index requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Force colour on or off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}
