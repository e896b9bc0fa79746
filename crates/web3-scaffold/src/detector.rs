//! Package manager detection
//!
//! Precedence: explicit request flags, then the `npm_config_user_agent`
//! hint set by whichever package manager launched us (`npx`, `yarn create`,
//! `pnpm create`), then probing for installed tools. npm is the fallback and
//! is never probed.

use crate::process::CommandRunner;
use crate::types::{PackageManager, ProjectRequest};
use tracing::debug;

/// Environment variable carrying the launching package manager's user agent
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Chooses the package manager for a run
pub struct PackageManagerDetector<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    user_agent: Option<String>,
}

impl<'a, R: CommandRunner + ?Sized> PackageManagerDetector<'a, R> {
    /// Create a detector with no user agent hint
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            user_agent: None,
        }
    }

    /// Set the user agent hint
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Pick a package manager; never fails
    pub async fn detect(&self, request: &ProjectRequest) -> PackageManager {
        if let Some(pm) = request.forced_package_manager() {
            debug!("Package manager forced by flag: {}", pm);
            return pm;
        }

        if let Some(pm) = self.user_agent.as_deref().and_then(from_user_agent) {
            debug!("Package manager from user agent: {}", pm);
            return pm;
        }

        for pm in [PackageManager::Pnpm, PackageManager::Yarn] {
            if self.runner.probe(pm.as_str(), &["--version"]).await {
                debug!("Package manager found on PATH: {}", pm);
                return pm;
            }
        }

        debug!("Falling back to npm");
        PackageManager::Npm
    }
}

/// Map a user agent such as `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`
pub fn from_user_agent(user_agent: &str) -> Option<PackageManager> {
    [
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Npm,
    ]
    .into_iter()
    .find(|pm| user_agent.starts_with(pm.as_str()))
}
