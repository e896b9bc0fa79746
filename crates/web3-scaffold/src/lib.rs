//! # web3-scaffold
//!
//! Project bootstrap library for the `create-web3-app` CLI providing:
//! - Project name validation (npm rules plus a reserved-name list)
//! - Package manager detection (flags, user agent, installed tools)
//! - Template materialization with exclusions and dotfile unescaping
//! - package.json patching
//! - Dependency installation and git repository initialization
//!
//! # Examples
//!
//! ## Create a project
//!
//! ```no_run
//! use web3_scaffold::config::ScaffoldConfig;
//! use web3_scaffold::pipeline::BootstrapPipeline;
//! use web3_scaffold::process::SystemRunner;
//! use web3_scaffold::{BootstrapOutcome, ProjectRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::load(None)?;
//! let runner = SystemRunner;
//! let pipeline = BootstrapPipeline::new(&config, &runner, "/opt/create-web3-app/template", "/tmp");
//!
//! let request = ProjectRequest::new("my-dapp").skip_git(true);
//! if let BootstrapOutcome::Created(summary) = pipeline.run(&request).await? {
//!     println!("Created {} at {}", summary.name, summary.path);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Validate a name
//!
//! ```
//! use web3_scaffold::config::ScaffoldConfig;
//! use web3_scaffold::validation::NameValidator;
//!
//! let validator = NameValidator::from_config(&ScaffoldConfig::default());
//! assert!(validator.validate("my-dapp").is_valid());
//! assert_eq!(validator.validate("ethers").reason(), Some("reserved"));
//! assert_eq!(validator.validate("My App").reason(), Some("invalid-name"));
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod git;
pub mod install;
pub mod manifest;
pub mod pipeline;
pub mod process;
pub mod templates;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use types::{BootstrapOutcome, PackageManager, PipelineStep, ProjectRequest, ProjectSummary};
