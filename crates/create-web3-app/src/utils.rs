//! Utility functions for locating bundled resources

use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;
use web3_scaffold::config::ScaffoldConfig;

/// Directory name of the bundled template
const TEMPLATE_DIR_NAME: &str = "template";

/// Get the template root
///
/// Returns the first of:
/// - `template-dir` from config (or CREATE_WEB3_APP_TEMPLATE_DIR)
/// - `template/` next to the executable (packaged installs)
/// - `template/` in this crate's source tree (cargo run / cargo install from a checkout)
pub fn get_template_dir(config: &ScaffoldConfig) -> Result<Utf8PathBuf> {
    if let Some(dir) = &config.template_dir {
        return Ok(dir.clone());
    }

    if let Some(dir) = exe_template_dir().filter(|d| d.is_dir()) {
        return Ok(dir);
    }

    Ok(Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_DIR_NAME))
}

fn exe_template_dir() -> Option<Utf8PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.join(TEMPLATE_DIR_NAME);
    Utf8PathBuf::from_path_buf(dir).ok()
}

/// Current working directory as UTF-8
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}
