//! Error types for web3-scaffold
//!
//! Errors fall into two tiers. Friendly errors are raised before any
//! filesystem side effect and carry a message meant for the user; the CLI
//! prints them as a warning and exits with code 1. Everything else is fatal
//! and propagates unchanged.

use thiserror::Error;

/// Result type alias using web3-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project bootstrap error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name breaks npm naming rules
    #[error("Could not create a project called \"{name}\" because of npm naming restrictions:\n{}", format_problems(.problems))]
    InvalidProjectName { name: String, problems: Vec<String> },

    /// Project name collides with a dependency of the template
    #[error("Could not create a project called \"{name}\" because a dependency with the same name exists.\nPlease choose a different project name.")]
    ReservedProjectName { name: String },

    /// Destination directory already exists
    #[error("The directory {path} already exists. Either try using a new directory name, or remove it.")]
    ProjectExists { path: String },

    /// No project name given and no way to ask for one
    #[error("Please specify the project directory:\n  create-web3-app <project-directory>")]
    MissingProjectName,

    /// Template root missing
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Path is not valid UTF-8 or not relative to its root
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Manifest is not a JSON object
    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: String, message: String },

    /// Package manager install exited non-zero
    #[error("{package_manager} install failed with exit code: {code:?}")]
    InstallFailed {
        package_manager: String,
        code: Option<i32>,
    },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Child process could not be spawned
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Interactive prompt failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Directory walk error
    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("    - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Whether this error is a recoverable, user-facing one
    pub fn is_friendly(&self) -> bool {
        matches!(
            self,
            Self::InvalidProjectName { .. }
                | Self::ReservedProjectName { .. }
                | Self::ProjectExists { .. }
                | Self::MissingProjectName
        )
    }

    /// Short machine-readable reason for friendly errors
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::InvalidProjectName { .. } => Some("invalid-name"),
            Self::ReservedProjectName { .. } => Some("reserved"),
            Self::ProjectExists { .. } => Some("exists"),
            Self::MissingProjectName => Some("missing-name"),
            _ => None,
        }
    }

    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, problems: Vec<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            problems,
        }
    }

    /// Create a reserved project name error
    pub fn reserved_project_name(name: impl Into<String>) -> Self {
        Self::ReservedProjectName { name: name.into() }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(path: impl Into<String>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an install failed error
    pub fn install_failed(package_manager: impl Into<String>, code: Option<i32>) -> Self {
        Self::InstallFailed {
            package_manager: package_manager.into(),
            code,
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
