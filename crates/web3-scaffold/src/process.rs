//! Child process execution
//!
//! Every external command the pipeline runs goes through [`CommandRunner`],
//! so detection, install and git steps can be exercised without spawning
//! real tools.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `cwd` with the caller's stdin/stdout/stderr
    /// and wait for it to exit. Spawn failures are errors; the exit status is
    /// returned as-is.
    async fn run_inherited(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Utf8Path,
    ) -> Result<ExitStatus>;

    /// Run `program args...` with all output discarded. Returns whether it
    /// spawned and exited 0.
    async fn probe(&self, program: &str, args: &[&str]) -> bool;
}

/// Runs commands on the host with tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run_inherited(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Utf8Path,
    ) -> Result<ExitStatus> {
        debug!("Running: {} {} (in {})", program, args.join(" "), cwd);

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::process_execution(format!("failed to spawn {}: {}", program, e)))?
            .wait()
            .await?;

        debug!("{} exited with {}", program, status);
        Ok(status)
    }

    async fn probe(&self, program: &str, args: &[&str]) -> bool {
        let result = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("Probe {} failed to spawn: {}", program, e);
                false
            }
        }
    }
}
