//! The requirements manifest model.
//!
//! # Modules
//!
//! - [`version`] - version parsing and operator comparison
//! - [`record`] - a single parsed requirement line
//! - [`collection`] - the ordered list of requirements in a manifest
//! - [`status`] - installed and latest-release status per requirement

pub mod collection;
pub mod record;
pub mod status;
pub mod version;

pub use collection::{AddResult, RequirementCollection};
pub use record::{RequirementRecord, RequirementSource, Spec};
pub use status::{
    InstallState, LatestState, LatestStatus, RequirementStatus, StatusEvaluator,
    ANY_VERSION_LABEL,
};
pub use version::{compare_versions, parse_version, Operator, ParsedVersion};
