//! Scaffold configuration with hierarchical loading
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. YAML config file (explicit path, `CREATE_WEB3_APP_CONFIG`, or `~/.create-web3-app/config.yaml`)
//! 3. Environment variables (`CREATE_WEB3_APP_*` prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "CREATE_WEB3_APP_CONFIG";
/// Environment override for the template root
pub const TEMPLATE_DIR_ENV: &str = "CREATE_WEB3_APP_TEMPLATE_DIR";
/// Environment override for the initial commit message
pub const COMMIT_MESSAGE_ENV: &str = "CREATE_WEB3_APP_COMMIT_MESSAGE";

/// Names the generated project must not take. These are the packages the
/// template itself depends on; a project named after one would shadow it.
pub const RESERVED_NAMES: &[&str] = &[
    "create-web3-app",
    "react",
    "react-dom",
    "next",
    "ethers",
    "typescript",
    "eslint",
    "eslint-config-next",
    "@types/node",
    "@types/react",
    "@types/react-dom",
];

/// Template-relative path fragments never copied into a new project.
/// Directories are matched with a trailing `/`.
pub const EXCLUDED_FRAGMENTS: &[&str] = &[
    "node_modules/",
    ".next/",
    "dist/",
    ".git/",
    "CHANGELOG.md",
];

/// Prefix standing in for a leading dot in template file names
pub const DOT_MARKER: &str = "_dot_";

/// Version written into every new manifest
pub const INITIAL_VERSION: &str = "0.1.0";

/// Message of the first commit
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from create-web3-app";

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScaffoldConfig {
    /// Template root override
    #[serde(default)]
    pub template_dir: Option<Utf8PathBuf>,

    /// Reserved project names
    #[serde(default = "default_reserved_names")]
    pub reserved_names: Vec<String>,

    /// Exclusion fragments
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Dot-marker prefix
    #[serde(default = "default_dot_marker")]
    pub dot_marker: String,

    /// Manifest version after patching
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    /// Initial commit message
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            reserved_names: default_reserved_names(),
            exclude: default_exclude(),
            dot_marker: default_dot_marker(),
            initial_version: default_initial_version(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_reserved_names() -> Vec<String> {
    RESERVED_NAMES.iter().map(|s| s.to_string()).collect()
}
fn default_exclude() -> Vec<String> {
    EXCLUDED_FRAGMENTS.iter().map(|s| s.to_string()).collect()
}
fn default_dot_marker() -> String {
    DOT_MARKER.to_string()
}
fn default_initial_version() -> String {
    INITIAL_VERSION.to_string()
}
fn default_commit_message() -> String {
    INITIAL_COMMIT_MESSAGE.to_string()
}

impl ScaffoldConfig {
    /// Load configuration with hierarchical precedence
    ///
    /// An explicit `path` must exist. Without one, `CREATE_WEB3_APP_CONFIG`
    /// is tried (and must exist when set), then the file in the user's home
    /// directory if present.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let mut config = match Self::config_file(path)? {
            Some(file) => Self::from_file(&file)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file; absent keys keep their defaults
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        debug!("Loading config from {}", path);
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Parse YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    fn config_file(explicit: Option<&Utf8Path>) -> Result<Option<Utf8PathBuf>> {
        if let Some(path) = explicit {
            return Self::require_exists(path.to_path_buf()).map(Some);
        }

        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Self::require_exists(Utf8PathBuf::from(path)).map(Some);
            }
        }

        Ok(Self::user_config_path().filter(|p| p.exists()))
    }

    fn require_exists(path: Utf8PathBuf) -> Result<Utf8PathBuf> {
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::invalid_config(format!(
                "Config file not found: {}",
                path
            )))
        }
    }

    /// `~/.create-web3-app/config.yaml`
    pub fn user_config_path() -> Option<Utf8PathBuf> {
        let home = dirs::home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home).ok()?;
        Some(home.join(".create-web3-app").join("config.yaml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var(TEMPLATE_DIR_ENV) {
            if !val.is_empty() {
                self.template_dir = Some(Utf8PathBuf::from(val));
            }
        }

        if let Ok(val) = env::var(COMMIT_MESSAGE_ENV) {
            if !val.trim().is_empty() {
                self.commit_message = val;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.dot_marker.is_empty() {
            return Err(Error::invalid_config("dot-marker must not be empty"));
        }
        if self.initial_version.trim().is_empty() {
            return Err(Error::invalid_config("initial-version must not be empty"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(Error::invalid_config("commit-message must not be empty"));
        }
        if self.exclude.iter().any(|f| f.is_empty()) {
            return Err(Error::invalid_config(
                "exclude entries must not be empty (an empty fragment excludes everything)",
            ));
        }
        Ok(())
    }
}
