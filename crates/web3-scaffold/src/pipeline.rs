//! Project bootstrap pipeline
//!
//! Runs the steps strictly forward:
//!
//! ```text
//! NamingInput -> Validating -> CollisionCheck -> Materializing -> Patching
//!             -> Installing -> (GitInit) -> Done
//! ```
//!
//! Validation and the collision check can abort with a friendly error, and
//! an empty prompt answer cancels the run. Nothing touches the filesystem
//! before `Materializing`; from there on every failure is fatal and nothing
//! is rolled back.

use crate::config::ScaffoldConfig;
use crate::detector::PackageManagerDetector;
use crate::error::{Error, Result};
use crate::git::RepositoryInitializer;
use crate::install::DependencyInstaller;
use crate::manifest::ManifestPatcher;
use crate::process::CommandRunner;
use crate::templates::TemplateMaterializer;
use crate::types::{BootstrapOutcome, PipelineStep, ProjectRequest, ProjectSummary};
use crate::validation::NameValidator;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Asks the user for a project name when none was given
pub trait NamePrompt: Send + Sync {
    /// Return the entered name, or `None` if the user declined.
    /// Implementations may use `validator` to reject names inline.
    fn ask_name(&self, validator: &NameValidator) -> Result<Option<String>>;
}

/// Prompt for sessions without a terminal: a missing name is an error
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl NamePrompt for NonInteractive {
    fn ask_name(&self, _validator: &NameValidator) -> Result<Option<String>> {
        Err(Error::MissingProjectName)
    }
}

/// Receives a notice before each side-effecting step runs
pub trait ProgressReporter: Send + Sync {
    fn step(&self, step: &PipelineStep);
}

/// Reporter that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn step(&self, step: &PipelineStep) {
        info!("{}", step);
    }
}

static NON_INTERACTIVE: NonInteractive = NonInteractive;
static LOG_REPORTER: LogReporter = LogReporter;

/// Orchestrates validation, copy, patch, install and git init
pub struct BootstrapPipeline<'a, R: CommandRunner + ?Sized> {
    config: &'a ScaffoldConfig,
    runner: &'a R,
    template_root: Utf8PathBuf,
    cwd: Utf8PathBuf,
    user_agent: Option<String>,
    prompt: &'a dyn NamePrompt,
    reporter: &'a dyn ProgressReporter,
}

impl<'a, R: CommandRunner + ?Sized> BootstrapPipeline<'a, R> {
    /// Create a pipeline creating projects under `cwd` from `template_root`
    pub fn new(
        config: &'a ScaffoldConfig,
        runner: &'a R,
        template_root: impl Into<Utf8PathBuf>,
        cwd: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            config,
            runner,
            template_root: template_root.into(),
            cwd: cwd.into(),
            user_agent: None,
            prompt: &NON_INTERACTIVE,
            reporter: &LOG_REPORTER,
        }
    }

    /// Builder: package manager user agent hint
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Builder: prompt used when no name was given
    pub fn with_prompt(mut self, prompt: &'a dyn NamePrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Builder: progress reporter
    pub fn with_reporter(mut self, reporter: &'a dyn ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run the pipeline for one request
    pub async fn run(&self, request: &ProjectRequest) -> Result<BootstrapOutcome> {
        let validator = NameValidator::from_config(self.config);

        // NamingInput
        let raw = match request.trimmed_name() {
            "" => match self.prompt.ask_name(&validator)? {
                Some(answer) if !answer.trim().is_empty() => answer.trim().to_string(),
                _ => {
                    info!("No project name given, cancelling");
                    return Ok(BootstrapOutcome::Cancelled);
                }
            },
            name => name.to_string(),
        };

        // Validating
        let destination = self.cwd.join(&raw);
        let name = project_name(&destination, &raw);
        debug!("Validating project name: {}", name);
        validator.validate(&name).into_result(&name)?;

        // CollisionCheck
        if destination.symlink_metadata().is_ok() {
            return Err(Error::project_exists(destination.as_str()));
        }

        let package_manager = PackageManagerDetector::new(self.runner)
            .with_user_agent(self.user_agent.clone())
            .detect(request)
            .await;

        // Materializing
        self.reporter.step(&PipelineStep::Materializing {
            name: name.clone(),
            path: destination.clone(),
        });
        let report = TemplateMaterializer::from_config(self.config)
            .materialize(&self.template_root, &destination)?;

        // Patching
        self.reporter.step(&PipelineStep::Patching);
        ManifestPatcher::new(self.config.initial_version.clone()).patch(&destination, &name)?;

        // Installing
        self.reporter.step(&PipelineStep::Installing { package_manager });
        DependencyInstaller::new(self.runner)
            .install(package_manager, &destination)
            .await?;

        // GitInit
        let git_initialized = if request.skip_git {
            debug!("Skipping git initialization");
            false
        } else {
            self.reporter.step(&PipelineStep::GitInit);
            RepositoryInitializer::new(self.runner, self.config.commit_message.clone())
                .initialize(&destination)
                .await?;
            true
        };

        info!("Project {} created at {}", name, destination);
        Ok(BootstrapOutcome::Created(ProjectSummary {
            name,
            path: destination,
            package_manager,
            files_copied: report.file_count(),
            git_initialized,
        }))
    }
}

/// Package name for a destination: its last path component
fn project_name(destination: &Utf8Path, raw: &str) -> String {
    destination
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}
