//! Create a new web3 app

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use web3_scaffold::config::ScaffoldConfig;
use web3_scaffold::detector::USER_AGENT_ENV;
use web3_scaffold::pipeline::{BootstrapPipeline, NamePrompt, NonInteractive};
use web3_scaffold::process::SystemRunner;
use web3_scaffold::{BootstrapOutcome, ProjectSummary};

use crate::cli::Cli;
use crate::interactive::{is_interactive, DialoguerPrompt, TerminalReporter};
use crate::output;
use crate::utils;

pub async fn run(cli: &Cli) -> Result<()> {
    let config =
        ScaffoldConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let template_dir = utils::get_template_dir(&config)?;
    let cwd = utils::current_dir()?;
    debug!("Using template at {}", template_dir);

    let runner = SystemRunner;
    let reporter = TerminalReporter::default();
    let prompt: &dyn NamePrompt = if is_interactive() {
        &DialoguerPrompt
    } else {
        &NonInteractive
    };

    let pipeline = BootstrapPipeline::new(&config, &runner, template_dir, cwd.clone())
        .with_user_agent(std::env::var(USER_AGENT_ENV).ok())
        .with_prompt(prompt)
        .with_reporter(&reporter);

    let outcome = pipeline.run(&cli.to_request()).await;
    reporter.finish();

    match outcome {
        Ok(BootstrapOutcome::Created(summary)) => {
            print_summary(&summary, &cwd);
            Ok(())
        }
        Ok(BootstrapOutcome::Cancelled) => {
            output::info("No project name given, nothing to do.");
            Ok(())
        }
        Err(e) if e.is_friendly() => {
            debug!("Aborting: {}", e.reason().unwrap_or("unknown"));
            output::warning(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Failed to create project"),
    }
}

fn print_summary(summary: &ProjectSummary, cwd: &Utf8Path) {
    println!();
    output::success(&format!("Created {} at {}", summary.name, summary.path));
    println!();
    output::kv("Package manager", summary.package_manager.as_str());
    output::kv("Files copied", &summary.files_copied.to_string());
    output::kv(
        "Git repository",
        if summary.git_initialized {
            "initialized"
        } else {
            "skipped"
        },
    );

    println!();
    output::info("Next steps:");
    for step in next_steps(summary, cwd) {
        output::command(&step);
    }
    println!();
}

/// Commands that start the dev server from `cwd`
fn next_steps(summary: &ProjectSummary, cwd: &Utf8Path) -> Vec<String> {
    let target: Utf8PathBuf = summary
        .path
        .strip_prefix(cwd)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|_| summary.path.clone());
    vec![
        format!("cd {}", target),
        summary.package_manager.run_script("dev"),
    ]
}
