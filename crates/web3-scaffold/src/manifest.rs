//! package.json patching

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use std::fs;
use tracing::{debug, info};

/// Manifest file name inside a project
pub const MANIFEST_FILE: &str = "package.json";

/// Rewrites `name` and `version` of a project's manifest
#[derive(Debug, Clone)]
pub struct ManifestPatcher {
    initial_version: String,
}

impl ManifestPatcher {
    /// Create a patcher writing the given version
    pub fn new(initial_version: impl Into<String>) -> Self {
        Self {
            initial_version: initial_version.into(),
        }
    }

    /// Path of the manifest under `project_root`
    pub fn manifest_path(project_root: &Utf8Path) -> Utf8PathBuf {
        project_root.join(MANIFEST_FILE)
    }

    /// Set `name` and `version` in `project_root/package.json`.
    ///
    /// Every other key keeps its value and position. The file is rewritten
    /// with a 2-space indent and a trailing newline.
    pub fn patch(&self, project_root: &Utf8Path, name: &str) -> Result<()> {
        let path = Self::manifest_path(project_root);
        debug!("Patching {}", path);

        let content = fs::read_to_string(&path)?;
        let mut manifest: Map<String, Value> = match serde_json::from_str(&content)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_manifest(
                    path.as_str(),
                    format!("expected a JSON object, found {}", json_kind(&other)),
                ))
            }
        };

        manifest.insert("name".to_string(), Value::String(name.to_string()));
        manifest.insert(
            "version".to_string(),
            Value::String(self.initial_version.clone()),
        );

        let mut output = serde_json::to_string_pretty(&Value::Object(manifest))?;
        output.push('\n');
        fs::write(&path, output)?;

        info!(
            "Set {} name to {} and version to {}",
            MANIFEST_FILE, name, self.initial_version
        );
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
