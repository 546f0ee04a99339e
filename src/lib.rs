//! Requirementz - check a pip requirements file against installed packages.
//!
//! Requirementz reads a `requirements.txt`, compares every entry with the
//! packages installed for a Python interpreter and, optionally, with the
//! latest releases on PyPI. It can also add, sort, search and de-duplicate
//! the file, rewriting it behind a temporary backup.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration file loading and resolved settings
//! - [`environment`] - Installed package discovery
//! - [`error`] - Error types and result aliases
//! - [`files`] - Backup-protected file writing
//! - [`registry`] - Package index (PyPI JSON API) client
//! - [`requirements`] - Requirement parsing, versions, manifests and status
//! - [`ui`] - Prompts, spinners, terminal output and formatting
//!
//! # Example
//!
//! ```
//! use requirementz::requirements::{AddResult, RequirementCollection};
//!
//! let mut records =
//!     RequirementCollection::from_lines(["docopt >= 0.6.2", "requirements-parser >= 0.1.0"])
//!         .unwrap();
//! assert!(matches!(records.add_line("docopt >= 0.6.1").unwrap(), AddResult::Replaced(_)));
//! assert_eq!(records.len(), 2);
//! ```
//!
//! For file-based usage, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod files;
pub mod registry;
pub mod requirements;
pub mod ui;

pub use error::{ReqzError, Result};
