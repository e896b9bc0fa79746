//! Integration tests for the bootstrap pipeline
//!
//! These tests run the complete pipeline against a temporary template and
//! working directory, with a recording runner standing in for package
//! managers and git.

mod common;

use common::{MockRunner, RecordingReporter, ScriptedPrompt, Workspace};
use serde_json::Value;
use std::fs;
use web3_scaffold::config::ScaffoldConfig;
use web3_scaffold::pipeline::BootstrapPipeline;
use web3_scaffold::{BootstrapOutcome, Error, PackageManager, PipelineStep, ProjectRequest};

fn read_manifest(path: &camino::Utf8Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path.join("package.json")).unwrap()).unwrap()
}

#[tokio::test]
async fn test_existing_destination_aborts_before_copy() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    let reporter = RecordingReporter::default();

    let destination = ws.cwd.join("my-dapp");
    fs::create_dir_all(&destination).unwrap();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd)
        .with_reporter(&reporter);
    let err = pipeline
        .run(&ProjectRequest::new("my-dapp"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ProjectExists { .. }));
    assert!(err.is_friendly());
    assert_eq!(fs::read_dir(&destination).unwrap().count(), 0);
    assert!(runner.invocations().is_empty());
    assert!(runner.probes().is_empty());
    assert!(reporter.steps().is_empty());
}

#[tokio::test]
async fn test_existing_file_at_destination_aborts() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    fs::write(ws.cwd.join("my-dapp"), "not a directory").unwrap();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    let err = pipeline
        .run(&ProjectRequest::new("my-dapp"))
        .await
        .unwrap_err();

    assert_eq!(err.reason(), Some("exists"));
}

#[tokio::test]
async fn test_reserved_name_aborts() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    let err = pipeline
        .run(&ProjectRequest::new("ethers"))
        .await
        .unwrap_err();

    assert_eq!(err.reason(), Some("reserved"));
    assert!(err.is_friendly());
    assert!(!ws.cwd.join("ethers").exists());
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_invalid_name_aborts() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    let err = pipeline
        .run(&ProjectRequest::new("My App"))
        .await
        .unwrap_err();

    assert_eq!(err.reason(), Some("invalid-name"));
    match err {
        Error::InvalidProjectName { name, problems } => {
            assert_eq!(name, "My App");
            assert!(!problems.is_empty());
        }
        other => panic!("Expected InvalidProjectName, got: {:?}", other),
    }
    assert!(!ws.cwd.join("My App").exists());
}

#[tokio::test]
async fn test_skip_git_with_forced_pnpm() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    runner.mock_available("yarn");
    let reporter = RecordingReporter::default();

    let request = ProjectRequest::new("my-dapp")
        .with_package_manager(PackageManager::Pnpm)
        .skip_git(true);
    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd)
        .with_user_agent(Some("npm/10.2.4 node/v20.11.0".to_string()))
        .with_reporter(&reporter);

    let outcome = pipeline.run(&request).await.unwrap();

    let destination = ws.cwd.join("my-dapp");
    let summary = match outcome {
        BootstrapOutcome::Created(summary) => summary,
        other => panic!("Expected Created, got: {:?}", other),
    };
    assert_eq!(summary.name, "my-dapp");
    assert_eq!(summary.path, destination);
    assert_eq!(summary.package_manager, PackageManager::Pnpm);
    assert_eq!(summary.files_copied, 3);
    assert!(!summary.git_initialized);

    // Template materialized
    assert!(destination.join(".gitignore").exists());
    assert!(destination.join("pages/index.tsx").exists());
    assert!(!destination.join("node_modules").exists());
    assert!(!destination.join("CHANGELOG.md").exists());

    // Manifest patched
    let manifest = read_manifest(&destination);
    assert_eq!(manifest["name"], "my-dapp");
    assert_eq!(manifest["version"], "0.1.0");
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["dependencies"]["ethers"], "^6.13.0");

    // Exactly one install, no git
    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].line(), "pnpm install");
    assert_eq!(invocations[0].cwd.as_ref(), Some(&destination));
    assert!(runner.probes().is_empty());

    assert_eq!(
        reporter.steps(),
        vec![
            PipelineStep::Materializing {
                name: "my-dapp".to_string(),
                path: destination.clone(),
            },
            PipelineStep::Patching,
            PipelineStep::Installing {
                package_manager: PackageManager::Pnpm
            },
        ]
    );
}

#[tokio::test]
async fn test_git_commands_follow_install_in_order() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let request = ProjectRequest::new("my-dapp").with_package_manager(PackageManager::Npm);
    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);

    let outcome = pipeline.run(&request).await.unwrap();
    assert!(matches!(
        outcome,
        BootstrapOutcome::Created(ref s) if s.git_initialized
    ));

    assert_eq!(
        runner.lines(),
        vec![
            "npm install".to_string(),
            "git init".to_string(),
            "git add .".to_string(),
            "git commit --no-verify -m Initial commit from create-web3-app".to_string(),
        ]
    );
    let destination = ws.cwd.join("my-dapp");
    for invocation in runner.invocations() {
        assert_eq!(invocation.cwd.as_ref(), Some(&destination));
    }
}

#[tokio::test]
async fn test_failed_git_add_stops_before_commit() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    runner.mock_exit("git add .", 128);

    let request = ProjectRequest::new("my-dapp").with_package_manager(PackageManager::Yarn);
    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);

    let err = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(err, Error::GitOperation { .. }));
    assert!(!err.is_friendly());
    assert_eq!(
        runner.lines(),
        vec!["yarn install", "git init", "git add ."]
    );
    // No rollback
    assert!(ws.cwd.join("my-dapp/package.json").exists());
}

#[tokio::test]
async fn test_failed_install_is_fatal_and_skips_git() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    runner.mock_exit("npm install", 1);

    let request = ProjectRequest::new("my-dapp").with_package_manager(PackageManager::Npm);
    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);

    let err = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(
        err,
        Error::InstallFailed {
            code: Some(1),
            ..
        }
    ));
    assert_eq!(runner.lines(), vec!["npm install"]);
    assert!(ws.cwd.join("my-dapp/.gitignore").exists());
}

#[tokio::test]
async fn test_detection_probes_after_collision_check() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    runner.mock_available("yarn");

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    let outcome = pipeline
        .run(&ProjectRequest::new("my-dapp").skip_git(true))
        .await
        .unwrap();

    match outcome {
        BootstrapOutcome::Created(summary) => {
            assert_eq!(summary.package_manager, PackageManager::Yarn)
        }
        other => panic!("Expected Created, got: {:?}", other),
    }
    let probed: Vec<String> = runner.probes().iter().map(|p| p.line()).collect();
    assert_eq!(probed, vec!["pnpm --version", "yarn --version"]);
    assert_eq!(runner.lines(), vec!["yarn install"]);
}

#[tokio::test]
async fn test_missing_name_prompts() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();
    let prompt = ScriptedPrompt::answering(Some("  prompted-dapp  "));

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd)
        .with_prompt(&prompt);
    let outcome = pipeline
        .run(&ProjectRequest::new("   ").skip_git(true).with_package_manager(PackageManager::Npm))
        .await
        .unwrap();

    assert_eq!(prompt.times_asked(), 1);
    assert!(matches!(outcome, BootstrapOutcome::Created(ref s) if s.name == "prompted-dapp"));
    assert_eq!(read_manifest(&ws.cwd.join("prompted-dapp"))["name"], "prompted-dapp");
}

#[tokio::test]
async fn test_declined_prompt_cancels() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    for answer in [None, Some(""), Some("   ")] {
        let prompt = ScriptedPrompt::answering(answer);
        let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd)
            .with_prompt(&prompt);

        let outcome = pipeline.run(&ProjectRequest::new("")).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::Cancelled);
    }
    assert_eq!(fs::read_dir(&ws.cwd).unwrap().count(), 0);
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_missing_name_without_terminal() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    let err = pipeline.run(&ProjectRequest::new("")).await.unwrap_err();

    assert!(matches!(err, Error::MissingProjectName));
    assert!(err.is_friendly());
}

#[tokio::test]
async fn test_nested_directory_uses_last_component_as_name() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);
    pipeline
        .run(
            &ProjectRequest::new("apps/my-dapp")
                .skip_git(true)
                .with_package_manager(PackageManager::Npm),
        )
        .await
        .unwrap();

    assert_eq!(read_manifest(&ws.cwd.join("apps/my-dapp"))["name"], "my-dapp");
}

#[tokio::test]
async fn test_custom_config_is_honored() {
    let ws = Workspace::new();
    let config = ScaffoldConfig {
        initial_version: "1.0.0-alpha.0".to_string(),
        commit_message: "chore: scaffold".to_string(),
        reserved_names: vec!["hardhat".to_string()],
        ..Default::default()
    };
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(&config, &runner, &ws.template_root, &ws.cwd);

    let err = pipeline
        .run(&ProjectRequest::new("hardhat"))
        .await
        .unwrap_err();
    assert_eq!(err.reason(), Some("reserved"));

    pipeline
        .run(&ProjectRequest::new("ethers").with_package_manager(PackageManager::Npm))
        .await
        .unwrap();

    assert_eq!(read_manifest(&ws.cwd.join("ethers"))["version"], "1.0.0-alpha.0");
    assert_eq!(
        runner.lines().last().unwrap(),
        "git commit --no-verify -m chore: scaffold"
    );
}

#[tokio::test]
async fn test_missing_template_is_fatal() {
    let ws = Workspace::new();
    let config = ScaffoldConfig::default();
    let runner = MockRunner::new();

    let pipeline = BootstrapPipeline::new(
        &config,
        &runner,
        ws.template_root.join("does-not-exist"),
        &ws.cwd,
    );
    let err = pipeline
        .run(&ProjectRequest::new("my-dapp").with_package_manager(PackageManager::Npm))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert!(!err.is_friendly());
    assert!(runner.invocations().is_empty());
}
