//! Non-interactive UI for pipes, CI and scripts.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::ReqzTheme;
use super::{is_yes_str, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "REQUIREMENTZ_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `REQUIREMENTZ_PROMPT_<KEY>` variables or the
/// prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ReqzTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            theme: ReqzTheme::for_color(color),
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: ReqzTheme::plain(),
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &ReqzTheme {
        &self.theme
    }

    fn output(&mut self, line: &str) {
        println!("{}", line);
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .map_or(prompt.default, |answer| is_yes_str(answer));
        tracing::debug!("Answered '{}' with {} ({})", prompt.question, answer, env_key);
        Ok(answer)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_detail() {
            eprintln!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that draws nothing.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, _msg: &str) {}

    fn finish_error(&mut self, _msg: &str) {}

    fn finish_clear(&mut self) {}
}
