//! Terminal implementations of the pipeline's prompt and progress hooks

use console::{style, Term};
use dialoguer::Input;
use indicatif::ProgressBar;
use std::sync::Mutex;

use web3_scaffold::pipeline::{NamePrompt, ProgressReporter};
use web3_scaffold::validation::{NameValidation, NameValidator};
use web3_scaffold::{Error, PipelineStep, Result};

use crate::output;

/// Pre-filled, editable answer; clearing it cancels
const DEFAULT_PROJECT_NAME: &str = "my-web3-app";

/// Whether we can ask questions on this terminal
pub fn is_interactive() -> bool {
    Term::stdout().is_term() && Term::stderr().is_term()
}

/// Asks for the project name with dialoguer, validating inline
#[derive(Debug, Default)]
pub struct DialoguerPrompt;

impl NamePrompt for DialoguerPrompt {
    fn ask_name(&self, validator: &NameValidator) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt("What is your project named?")
            .with_initial_text(DEFAULT_PROJECT_NAME)
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                let name = input.trim();
                if name.is_empty() {
                    return Ok(());
                }
                match validator.validate(last_component(name)) {
                    NameValidation::Valid => Ok(()),
                    NameValidation::Reserved => {
                        Err(format!("\"{}\" is the name of a template dependency", name))
                    }
                    NameValidation::Invalid { problems } => Err(format!(
                        "Invalid project name: {}",
                        problems.first().map(String::as_str).unwrap_or("unknown problem")
                    )),
                }
            })
            .interact_text()
            .map_err(|e| Error::prompt(e.to_string()))?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

fn last_component(name: &str) -> &str {
    name.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(name)
}

/// Prints each step; shows a spinner while the template is copied
#[derive(Debug, Default)]
pub struct TerminalReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    /// Finish any running spinner
    pub fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn step(&self, step: &PipelineStep) {
        self.finish();

        match step {
            PipelineStep::Materializing { path, .. } => {
                println!();
                output::info(&format!(
                    "Creating a new web3 app in {}.",
                    style(path).green()
                ));
                println!();
                if let Ok(mut guard) = self.spinner.lock() {
                    *guard = Some(output::spinner("Copying template files..."));
                }
            }
            PipelineStep::Patching => {
                tracing::debug!("{}", step);
            }
            PipelineStep::Installing { package_manager } => {
                output::info(&format!(
                    "Installing dependencies with {}...",
                    style(package_manager).cyan()
                ));
                println!();
            }
            PipelineStep::GitInit => {
                println!();
                output::info("Initializing a git repository...");
            }
        }
    }
}
