//! Visual theme and styling.

use console::Style;

/// Requirementz's visual theme.
#[derive(Debug, Clone)]
pub struct ReqzTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for package names (blue).
    pub name: Style,
    /// Style for package names with errors (red).
    pub name_error: Style,
    /// Style for versions (cyan).
    pub version: Style,
    /// Style for versions with errors (red).
    pub version_error: Style,
    /// Style for `-e`, extras and labels (cyan).
    pub label: Style,
    /// Style for counts (blue bold).
    pub count: Style,
    /// Style for install locations (green).
    pub location: Style,
    /// Style for the loose `-` marker (yellow bold).
    pub loose: Style,
    /// Style for the not-found `?` marker and the index label (magenta).
    pub remote: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for ReqzTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqzTheme {
    /// Create the default coloured theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            name: Style::new().blue(),
            name_error: Style::new().red(),
            version: Style::new().cyan(),
            version_error: Style::new().red(),
            label: Style::new().cyan(),
            count: Style::new().blue().bold(),
            location: Style::new().green(),
            loose: Style::new().yellow().bold(),
            remote: Style::new().magenta(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            name: Style::new(),
            name_error: Style::new(),
            version: Style::new(),
            version_error: Style::new(),
            label: Style::new(),
            count: Style::new(),
            location: Style::new(),
            loose: Style::new(),
            remote: Style::new(),
            dim: Style::new(),
        }
    }

    /// Pick the coloured or plain theme.
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
///
/// An explicit setting wins; otherwise `NO_COLOR` disables colour and a
/// terminal on stdout enables it.
pub fn should_use_colors(setting: Option<bool>) -> bool {
    if let Some(color) = setting {
        return color;
    }

    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_without_escapes() {
        let theme = ReqzTheme::plain();
        assert_eq!(theme.format_success("Added"), "✓ Added");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn explicit_setting_wins() {
        assert!(should_use_colors(Some(true)));
        assert!(!should_use_colors(Some(false)));
    }

    #[test]
    fn for_color_selects_theme() {
        let plain = ReqzTheme::for_color(false);
        assert_eq!(plain.name.apply_to("six").to_string(), "six");
    }
}
