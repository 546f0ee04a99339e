//! Resolved settings for one run.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::schema::ConfigFile;
use crate::registry::PypiClient;

pub const DEFAULT_FILE: &str = "requirements.txt";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config values with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file: PathBuf,
    pub index_url: String,
    pub python: String,
    pub site_packages: Vec<PathBuf>,
    pub timeout: Duration,
    pub color: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&ConfigFile::default())
    }
}

impl Settings {
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            file: config
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE)),
            index_url: config
                .index_url
                .clone()
                .unwrap_or_else(|| PypiClient::DEFAULT_INDEX_URL.to_string()),
            python: config
                .python
                .clone()
                .unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
            site_packages: config.site_packages.clone(),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            color: config.color,
        }
    }

    /// Replace the requirements file when one was given on the command line.
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        if let Some(file) = file {
            self.file = file;
        }
        self
    }

    /// Disable colour when requested on the command line.
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        if no_color {
            self.color = Some(false);
        }
        self
    }
}
