//! Copies a template tree into a new project directory.

use super::filter::{unescape_file_name, ExclusionRule};
use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result of a template copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Destination paths of copied files, relative to the destination root
    pub files: Vec<Utf8PathBuf>,
}

impl MaterializeReport {
    /// Number of files copied
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Copies a template root to a destination root, filtering and renaming.
#[derive(Debug, Clone)]
pub struct TemplateMaterializer {
    exclusions: ExclusionRule,
    dot_marker: String,
}

impl TemplateMaterializer {
    /// Create a materializer with explicit rules
    pub fn new(exclusions: ExclusionRule, dot_marker: impl Into<String>) -> Self {
        Self {
            exclusions,
            dot_marker: dot_marker.into(),
        }
    }

    /// Create a materializer from configuration
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self::new(ExclusionRule::from_config(config), config.dot_marker.clone())
    }

    /// Copy `template_root` into `destination_root`.
    ///
    /// The destination is created if needed. Files are copied byte for byte.
    /// No cleanup happens on failure; a partial tree may be left behind.
    pub fn materialize(
        &self,
        template_root: &Utf8Path,
        destination_root: &Utf8Path,
    ) -> Result<MaterializeReport> {
        if !template_root.is_dir() {
            return Err(Error::template_not_found(template_root.as_str()));
        }

        info!("Copying template {} to {}", template_root, destination_root);
        fs::create_dir_all(destination_root)?;

        let mut report = MaterializeReport::default();

        let walker = WalkDir::new(template_root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| {
                match relative_path(template_root, e.path()) {
                    Ok(rel) => {
                        let excluded = self.is_excluded(&rel, e.file_type().is_dir());
                        if excluded {
                            debug!("Excluding {}", rel);
                        }
                        !excluded
                    }
                    // Keep it so the error surfaces below
                    Err(_) => true,
                }
            });

        for entry in walker {
            let entry = entry?;
            let rel = relative_path(template_root, entry.path())?;
            let dest_rel = self.destination_relative(&rel);
            let dest = destination_root.join(&dest_rel);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&dest)?;
            } else if file_type.is_file() {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &dest)?;
                debug!("Copied {} -> {}", rel, dest_rel);
                report.files.push(dest_rel);
            } else {
                warn!("Skipping {}: not a regular file or directory", rel);
            }
        }

        info!("Copied {} file(s)", report.file_count());
        Ok(report)
    }

    /// Excluded by its template path or by the path it would be written to
    fn is_excluded(&self, rel: &str, is_dir: bool) -> bool {
        self.exclusions.is_excluded(rel, is_dir)
            || self
                .exclusions
                .is_excluded(self.destination_relative(rel).as_str(), is_dir)
    }

    /// Unescape the dot-marker on every component of a relative path
    fn destination_relative(&self, rel: &str) -> Utf8PathBuf {
        rel.split('/')
            .map(|component| unescape_file_name(component, &self.dot_marker))
            .collect()
    }
}

/// `path` relative to `root`, `/`-separated
fn relative_path(root: &Utf8Path, path: &std::path::Path) -> Result<String> {
    let rel = path
        .strip_prefix(root.as_std_path())
        .map_err(|_| Error::invalid_path(path.to_string_lossy()))?;
    let rel = Utf8Path::from_path(rel).ok_or_else(|| Error::invalid_path(path.to_string_lossy()))?;

    Ok(rel
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/"))
}
