//! Entry selection for directory adds.

use crate::Error;
use crate::Result;
use glob::MatchOptions;
use glob::Pattern;
use std::path::Path;

/// Checks if a path is hidden (its own name starts with '.').
///
/// Only the final component is checked, so a regular file inside a hidden
/// directory is not hidden.
///
/// # Examples
///
/// ```
/// use bln_etl_core::archive::filters;
/// use std::path::Path;
///
/// assert!(filters::is_hidden(Path::new(".gitignore")));
/// assert!(filters::is_hidden(Path::new("dir/.hidden")));
/// assert!(!filters::is_hidden(Path::new(".dir/visible.txt")));
/// ```
#[must_use]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Compiled glob selecting entries by their path relative to the walked
/// folder.
///
/// `*` and `?` do not cross `/`; `**/` matches zero or more directories;
/// leading dots need no literal match (hidden entries are handled
/// separately).
///
/// Patterns are only ever tested against files. A pattern ending in `**`
/// (such as `**` or `data/**`) therefore selects every file below that
/// point, where a directory-listing glob would yield directories only.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    pattern: Pattern,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl GlobFilter {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the glob does not parse.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Checks a `/`-separated relative path against the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use bln_etl_core::archive::filters::GlobFilter;
    ///
    /// let filter = GlobFilter::new("**/*.csv").unwrap();
    /// assert!(filter.matches("test.csv"));
    /// assert!(filter.matches("nested/test3.csv"));
    /// assert!(!filter.matches("test.json"));
    /// ```
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        self.pattern.matches_with(relative, MATCH_OPTIONS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_double_star_matches_files() {
        let filter = GlobFilter::new("**").unwrap();
        assert!(filter.matches("top.csv"));
        assert!(filter.matches("d/e/deep.csv"));

        let filter = GlobFilter::new("d/**").unwrap();
        assert!(filter.matches("d/e/deep.csv"));
        assert!(!filter.matches("top.csv"));
    }

    #[test]
    fn test_is_hidden_dotfiles() {
        assert!(is_hidden(Path::new(".secret.txt")));
        assert!(is_hidden(Path::new("a/b/.env")));
        assert!(is_hidden(Path::new(".hidden")));
    }

    #[test]
    fn test_is_hidden_checks_own_name_only() {
        assert!(!is_hidden(Path::new(".hidden/visible.txt")));
        assert!(!is_hidden(Path::new("main.rs")));
        assert!(!is_hidden(Path::new("")));
    }

    #[test]
    fn test_default_pattern_matches_everything() {
        let filter = GlobFilter::new("**/*").unwrap();
        assert!(filter.matches("test.csv"));
        assert!(filter.matches("nested/test3.csv"));
        assert!(filter.matches("a/b/c/d.txt"));
        assert!(filter.matches(".hidden/.secret.txt"));
    }

    #[test]
    fn test_extension_pattern_any_depth() {
        let filter = GlobFilter::new("**/*.csv").unwrap();
        assert!(filter.matches("test.csv"));
        assert!(filter.matches("nested/test3.csv"));
        assert!(!filter.matches("test.json"));
        assert!(!filter.matches("nested/test.json"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let filter = GlobFilter::new("*.csv").unwrap();
        assert!(filter.matches("test.csv"));
        assert!(!filter.matches("nested/test3.csv"));
    }

    #[test]
    fn test_subdirectory_pattern() {
        let filter = GlobFilter::new("nested/*").unwrap();
        assert!(filter.matches("nested/test3.csv"));
        assert!(!filter.matches("test.csv"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = GlobFilter::new("[unclosed");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_as_str() {
        let filter = GlobFilter::new("**/*.json").unwrap();
        assert_eq!(filter.as_str(), "**/*.json");
    }
}
