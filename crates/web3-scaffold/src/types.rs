//! Core types for project bootstrap

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm
    Npm,
    /// Yarn
    Yarn,
    /// pnpm
    Pnpm,
}

impl PackageManager {
    /// Executable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Command line used to run a package script, e.g. `npm run dev`
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {}", script),
            Self::Yarn => format!("yarn {}", script),
            Self::Pnpm => format!("pnpm {}", script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            _ => Err(format!("Unknown package manager: {}", s)),
        }
    }
}

/// A request to create one project, built from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRequest {
    /// Project directory as typed by the user (untrimmed)
    pub raw_name: String,
    /// Force npm
    pub use_npm: bool,
    /// Force Yarn
    pub use_yarn: bool,
    /// Force pnpm
    pub use_pnpm: bool,
    /// Skip git repository initialization
    pub skip_git: bool,
}

impl ProjectRequest {
    /// Create a request for the given project directory
    pub fn new(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            ..Default::default()
        }
    }

    /// Builder: force a package manager
    pub fn with_package_manager(mut self, pm: PackageManager) -> Self {
        match pm {
            PackageManager::Npm => self.use_npm = true,
            PackageManager::Yarn => self.use_yarn = true,
            PackageManager::Pnpm => self.use_pnpm = true,
        }
        self
    }

    /// Builder: skip git initialization
    pub fn skip_git(mut self, skip: bool) -> Self {
        self.skip_git = skip;
        self
    }

    /// Trimmed project name
    pub fn trimmed_name(&self) -> &str {
        self.raw_name.trim()
    }

    /// Package manager forced by flags, pnpm > yarn > npm
    pub fn forced_package_manager(&self) -> Option<PackageManager> {
        if self.use_pnpm {
            Some(PackageManager::Pnpm)
        } else if self.use_yarn {
            Some(PackageManager::Yarn)
        } else if self.use_npm {
            Some(PackageManager::Npm)
        } else {
            None
        }
    }
}

/// Pipeline steps, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStep {
    /// Copying the template into the destination
    Materializing { name: String, path: Utf8PathBuf },
    /// Rewriting package.json
    Patching,
    /// Running the package manager
    Installing { package_manager: PackageManager },
    /// Running git init/add/commit
    GitInit,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Materializing { path, .. } => {
                write!(f, "Creating a new web3 app in {}", path)
            }
            Self::Patching => write!(f, "Updating package.json"),
            Self::Installing { package_manager } => {
                write!(f, "Installing dependencies with {}", package_manager)
            }
            Self::GitInit => write!(f, "Initializing a git repository"),
        }
    }
}

/// Summary of a created project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Validated package name
    pub name: String,
    /// Absolute destination root
    pub path: Utf8PathBuf,
    /// Package manager used for install
    pub package_manager: PackageManager,
    /// Number of template files copied
    pub files_copied: usize,
    /// Whether a git repository was created
    pub git_initialized: bool,
}

/// Outcome of a pipeline run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Project created
    Created(ProjectSummary),
    /// User declined to provide a name
    Cancelled,
}
