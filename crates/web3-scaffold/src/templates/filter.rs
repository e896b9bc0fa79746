//! Path filtering and renaming for template copies.
//!
//! - Exclusion fragments (build output, VCS metadata, changelogs)
//! - Dot-marker unescaping (`_dot_gitignore` -> `.gitignore`)

use crate::config::ScaffoldConfig;

/// Template-relative path fragments that are never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    fragments: Vec<String>,
}

impl ExclusionRule {
    /// Creates a rule from path fragments.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the rule from the configured fragments.
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self::new(config.exclude.iter().cloned())
    }

    /// Configured fragments.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Whether a template-relative path is excluded.
    ///
    /// `rel_path` uses `/` separators. Directories are tested with a trailing
    /// `/` so that a fragment like `.git/` prunes the `.git` directory itself
    /// but leaves `.github` and `.gitignore` alone.
    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        if is_dir {
            let with_slash = format!("{}/", rel_path.trim_end_matches('/'));
            self.matches(&with_slash)
        } else {
            self.matches(rel_path)
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.fragments.iter().any(|f| path.contains(f.as_str()))
    }
}

/// Replaces a leading dot-marker with `.`, exactly once.
///
/// Names without the marker are returned unchanged. A bare marker is left
/// alone, since unescaping it would produce an empty name after the dot.
pub fn unescape_file_name(name: &str, marker: &str) -> String {
    match name.strip_prefix(marker) {
        Some(rest) if !marker.is_empty() && !rest.is_empty() => format!(".{}", rest),
        _ => name.to_string(),
    }
}
