//! Dependency installation

use crate::error::{Error, Result};
use crate::process::CommandRunner;
use crate::types::PackageManager;
use camino::Utf8Path;
use tracing::info;

/// Runs `<package manager> install` in a project
pub struct DependencyInstaller<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> DependencyInstaller<'a, R> {
    /// Create an installer using `runner`
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Install dependencies with live output.
    ///
    /// # Errors
    /// Returns error if the package manager cannot be spawned or exits
    /// non-zero. There is no retry and no fallback to another manager.
    pub async fn install(
        &self,
        package_manager: PackageManager,
        project_root: &Utf8Path,
    ) -> Result<()> {
        info!("Running {} install in {}", package_manager, project_root);

        let status = self
            .runner
            .run_inherited(package_manager.as_str(), &["install"], project_root)
            .await?;

        if !status.success() {
            return Err(Error::install_failed(package_manager.as_str(), status.code()));
        }

        info!("Dependencies installed");
        Ok(())
    }
}
