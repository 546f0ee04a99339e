//! Shared helpers for commands that read the requirements file.

use std::path::Path;

use crate::error::{ReqzError, Result};
use crate::requirements::RequirementCollection;
use crate::ui::UserInterface;

/// Load the requirements file, or `None` after warning when it is empty.
pub fn load_nonempty(ui: &mut dyn UserInterface, file: &Path) -> Result<Option<RequirementCollection>> {
    let records = RequirementCollection::from_file(file)?;
    if records.is_empty() {
        let notice = ReqzError::EmptyManifest {
            path: file.to_path_buf(),
        };
        ui.warning(&notice.to_string());
        return Ok(None);
    }
    Ok(Some(records))
}
