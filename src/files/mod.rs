//! Filesystem helpers.
//!
//! - [`safe_writer`] - backup-then-write wrapper used for manifest rewrites

pub mod safe_writer;

pub use safe_writer::SafeFileWriter;
