//! Error types for Requirementz operations.
//!
//! This module defines [`ReqzError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ReqzError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ReqzError::Other`) for unexpected errors
//! - File errors are split by OS error kind so users get a clear message

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Core error type for Requirementz operations.
#[derive(Debug, Error)]
pub enum ReqzError {
    /// A requirement line could not be parsed.
    #[error("Invalid requirement spec: {line} ({message})")]
    Parse { line: String, message: String },

    /// Requirements file does not exist.
    #[error("Requirements file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Requirements file exists but cannot be read or written.
    #[error("Invalid permissions for file: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure on a named file.
    #[error("Error with file: {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backup copy could not be created, the original was not touched.
    #[error("Failed to backup: {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The write succeeded but the backup copy could not be removed.
    #[error("Failed to remove backup file: {}: {source}", path.display())]
    BackupRemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requirement being added already exists.
    #[error("Already a requirement: {existing}")]
    Duplicate { existing: String },

    /// A search pattern is not a valid regex.
    #[error("Invalid regex pattern: {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The package index has no such package (HTTP 404).
    #[error("No package found for: {package}")]
    PackageNotFound { package: String },

    /// Any other package index failure.
    #[error("Failed to get package info for '{package}': {message}")]
    Remote { package: String, message: String },

    /// Installed packages could not be listed at all.
    #[error("Unable to retrieve installed packages: {message}")]
    PackageListing { message: String },

    /// The requirements file has no entries.
    #[error("Requirements file was empty: {}", path.display())]
    EmptyManifest { path: PathBuf },

    /// An explicitly requested config file does not exist.
    #[error("Configuration not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// A config file is not valid YAML or has the wrong shape.
    #[error("Failed to parse config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The user declined an interactive prompt.
    #[error("User cancelled.")]
    UserCancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReqzError {
    /// Map an I/O error on `path` to the matching file error.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ReqzError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ReqzError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ReqzError::FileIo {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Exit code the binary uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReqzError::UserCancelled => 2,
            ReqzError::EmptyManifest { .. } => 0,
            _ => 1,
        }
    }
}

/// Result type alias for Requirementz operations.
pub type Result<T> = std::result::Result<T, ReqzError>;
