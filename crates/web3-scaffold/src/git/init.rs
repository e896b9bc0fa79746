//! Repository initialization operations

use crate::error::{Error, Result};
use crate::process::CommandRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// Creates a repository with a single commit holding the new project
pub struct RepositoryInitializer<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    commit_message: String,
}

impl<'a, R: CommandRunner + ?Sized> RepositoryInitializer<'a, R> {
    /// Create an initializer committing with `commit_message`
    pub fn new(runner: &'a R, commit_message: impl Into<String>) -> Self {
        Self {
            runner,
            commit_message: commit_message.into(),
        }
    }

    /// The git invocations, in order
    pub fn commands(&self) -> Vec<Vec<&str>> {
        vec![
            vec!["init"],
            vec!["add", "."],
            vec!["commit", "--no-verify", "-m", self.commit_message.as_str()],
        ]
    }

    /// Initialize a new git repository
    ///
    /// Runs `git init`, `git add .` and `git commit --no-verify -m <message>`
    /// in `path`. Each command must exit 0 before the next starts.
    ///
    /// # Errors
    /// Returns error if git cannot be spawned or any command fails. Nothing
    /// is rolled back; a failed commit leaves the `.git` directory in place.
    pub async fn initialize(&self, path: &Utf8Path) -> Result<()> {
        info!("Initializing git repository at: {}", path);

        for args in self.commands() {
            debug!("Running: git {}", args.join(" "));
            let status = self.runner.run_inherited("git", &args, path).await?;

            if !status.success() {
                return Err(Error::git_operation(format!(
                    "git {} failed with exit code: {:?}",
                    args[0],
                    status.code()
                )));
            }
        }

        info!("Initial commit created");
        Ok(())
    }
}
