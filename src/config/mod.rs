//! Configuration loading.
//!
//! Two optional YAML files are merged, later wins:
//! 1. User global config (`~/.requirementz/config.yml`)
//! 2. Project config (`.requirementz.yml`)
//!
//! `--config FILE` loads only that file. Command-line flags override both.
//!
//! # Example
//!
//! ```
//! use requirementz::config::{load_config, Settings};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".requirementz.yml"), "file: dev-requirements.txt").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! let settings = Settings::from_config(&config);
//! assert_eq!(settings.file.to_str(), Some("dev-requirements.txt"));
//! ```

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{load_config, load_config_file, merge_values, ConfigPaths};
pub use schema::ConfigFile;
pub use settings::Settings;
