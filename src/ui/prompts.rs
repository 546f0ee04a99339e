//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{ReqzError, Result};

use super::Prompt;

/// Convert dialoguer errors, treating an interrupted prompt as a cancel.
fn map_dialoguer_err(e: dialoguer::Error) -> ReqzError {
    let io: std::io::Error = e.into();
    match io.kind() {
        std::io::ErrorKind::Interrupted | std::io::ErrorKind::UnexpectedEof => {
            ReqzError::UserCancelled
        }
        _ => ReqzError::Io(io),
    }
}

/// Ask a yes/no question on `term`.
pub fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::new()
        .with_prompt(&prompt.question)
        .default(prompt.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
