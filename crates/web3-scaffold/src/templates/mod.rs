//! Template materialization for project scaffolding.
//!
//! A template is a plain directory tree shipped with the CLI. It is copied
//! into the new project as-is, with two adjustments:
//! - `filter`: entries whose relative path contains an exclusion fragment
//!   (build output, VCS metadata, changelogs) are skipped, and excluded
//!   directories are pruned without being visited
//! - `filter`: file names starting with the dot-marker are unescaped to a
//!   leading dot, so dotfiles survive npm packaging of the template
//!
//! There is no variable substitution; `package.json` is patched afterwards
//! by [`crate::manifest::ManifestPatcher`].
//!
//! # Example Usage
//!
//! ```no_run
//! use camino::Utf8Path;
//! use web3_scaffold::config::ScaffoldConfig;
//! use web3_scaffold::templates::TemplateMaterializer;
//!
//! let materializer = TemplateMaterializer::from_config(&ScaffoldConfig::default());
//! let report = materializer
//!     .materialize(Utf8Path::new("template"), Utf8Path::new("/tmp/my-dapp"))
//!     .unwrap();
//! println!("Copied {} files", report.file_count());
//! ```

pub mod filter;
pub mod materializer;

pub use filter::{unescape_file_name, ExclusionRule};
pub use materializer::{MaterializeReport, TemplateMaterializer};
