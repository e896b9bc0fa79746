//! Git operations module
//!
//! Creates the repository for a freshly scaffolded project:
//! `git init`, `git add .`, then a commit with hooks disabled.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use web3_scaffold::git::RepositoryInitializer;
//! use web3_scaffold::process::SystemRunner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = SystemRunner;
//! RepositoryInitializer::new(&runner, "Initial commit from create-web3-app")
//!     .initialize(Utf8Path::new("/tmp/my-dapp"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod init;

pub use init::RepositoryInitializer;
