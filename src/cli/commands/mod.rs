//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`requirementz check`, `requirementz add`)
//! - Shared settings and data sources
//! - Exit codes that count problems (`check`, `duplicates`, `info`)

pub mod add;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod duplicates;
pub mod info;
pub mod list;
pub mod packages;
pub mod search;
pub mod sort;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
