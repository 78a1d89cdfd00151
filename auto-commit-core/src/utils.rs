use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// width of the frame printed around the generated message
pub const SEPARATOR_WIDTH: usize = 43;

/// last path component, falling back to the input when there is none
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// lowercased text after the last `.` of the last path component, if any
///
/// dotfiles count: `docs/.md` has extension `md`
pub fn extension_lowercase(path: &str) -> Option<String> {
    base_name(path)
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// the `═` rule framing the message
pub fn separator() -> String {
    "═".repeat(SEPARATOR_WIDTH)
}

/// spinner shown while git lists and diffs the index
pub fn staged_changes_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&[
            "📊 ⠋", "📊 ⠙", "📊 ⠹", "📊 ⠸",
            "📊 ⠼", "📊 ⠴", "📊 ⠦", "📊 ⠧",
            "📊 ⠇", "📊 ⠏"
        ])
        .template("{spinner} reading staged changes...")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("src/components/button.tsx"), "button.tsx");
        assert_eq!(base_name("README.md"), "README.md");
        assert_eq!(base_name("a/b/"), "b");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_lowercase("docs/INDEX.MD").as_deref(), Some("md"));
        assert_eq!(extension_lowercase("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_lowercase("Makefile"), None);
        assert_eq!(extension_lowercase("trailing."), None);
    }

    #[test]
    fn dotfiles_keep_their_extension() {
        assert_eq!(extension_lowercase("docs/.md").as_deref(), Some("md"));
        assert_eq!(extension_lowercase(".gitignore").as_deref(), Some("gitignore"));
        assert_eq!(extension_lowercase("v1.2/Makefile"), None);
    }

    #[test]
    fn separator_has_fixed_width() {
        assert_eq!(separator().chars().count(), SEPARATOR_WIDTH);
    }
}
