//! Shared fixtures for pipeline integration tests
//!
//! Provides a recording command runner so install and git steps can be
//! checked without spawning package managers or git.

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::fs;
use std::process::ExitStatus;
use std::sync::Mutex;
use tempfile::TempDir;
use web3_scaffold::pipeline::{NamePrompt, ProgressReporter};
use web3_scaffold::process::CommandRunner;
use web3_scaffold::validation::NameValidator;
use web3_scaffold::{PipelineStep, Result};

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Record of a command invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockCommandInvocation {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<Utf8PathBuf>,
}

impl MockCommandInvocation {
    /// `program arg1 arg2`
    pub fn line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Mock command runner for testing
#[derive(Default)]
pub struct MockRunner {
    /// Exit codes keyed by `program arg1 ...`; unknown commands exit 0
    exit_codes: Mutex<HashMap<String, i32>>,
    /// Programs whose `--version` probe succeeds
    available: Mutex<Vec<String>>,
    /// Recorded `run_inherited` calls
    invocations: Mutex<Vec<MockCommandInvocation>>,
    /// Recorded probes
    probes: Mutex<Vec<MockCommandInvocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `line` exit with `code`
    pub fn mock_exit(&self, line: &str, code: i32) {
        self.exit_codes
            .lock()
            .unwrap()
            .insert(line.to_string(), code);
    }

    /// Make probes of `program` succeed
    pub fn mock_available(&self, program: &str) {
        self.available.lock().unwrap().push(program.to_string());
    }

    pub fn invocations(&self) -> Vec<MockCommandInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.invocations().iter().map(|i| i.line()).collect()
    }

    pub fn probes(&self) -> Vec<MockCommandInvocation> {
        self.probes.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run_inherited(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Utf8Path,
    ) -> Result<ExitStatus> {
        let invocation = MockCommandInvocation {
            command: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: Some(cwd.to_path_buf()),
        };
        let code = self
            .exit_codes
            .lock()
            .unwrap()
            .get(&invocation.line())
            .copied()
            .unwrap_or(0);
        self.invocations.lock().unwrap().push(invocation);
        Ok(exit_status(code))
    }

    async fn probe(&self, program: &str, args: &[&str]) -> bool {
        self.probes.lock().unwrap().push(MockCommandInvocation {
            command: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
        });
        self.available.lock().unwrap().iter().any(|p| p == program)
    }
}

/// Prompt returning a canned answer
pub struct ScriptedPrompt {
    pub answer: Option<String>,
    pub asked: Mutex<usize>,
}

impl ScriptedPrompt {
    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            asked: Mutex::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl NamePrompt for ScriptedPrompt {
    fn ask_name(&self, _validator: &NameValidator) -> Result<Option<String>> {
        *self.asked.lock().unwrap() += 1;
        Ok(self.answer.clone())
    }
}

/// Reporter recording every step
#[derive(Default)]
pub struct RecordingReporter {
    steps: Mutex<Vec<PipelineStep>>,
}

impl RecordingReporter {
    pub fn steps(&self) -> Vec<PipelineStep> {
        self.steps.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, step: &PipelineStep) {
        self.steps.lock().unwrap().push(step.clone());
    }
}

/// A template root plus an empty working directory
pub struct Workspace {
    _template: TempDir,
    _cwd: TempDir,
    pub template_root: Utf8PathBuf,
    pub cwd: Utf8PathBuf,
}

impl Workspace {
    /// Small web3 template with a dotfile, an excluded dir and a changelog
    pub fn new() -> Self {
        let template = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let template_root = Utf8PathBuf::from_path_buf(template.path().to_path_buf()).unwrap();
        let cwd_root = Utf8PathBuf::from_path_buf(cwd.path().to_path_buf()).unwrap();

        write(
            &template_root,
            "package.json",
            r#"{
  "name": "web3-template",
  "version": "2.3.1",
  "private": true,
  "scripts": { "dev": "next dev" },
  "dependencies": { "ethers": "^6.13.0", "next": "14.2.5" }
}"#,
        );
        write(&template_root, "_dot_gitignore", "node_modules\n.next\n");
        write(&template_root, "pages/index.tsx", "export default function Home() {}\n");
        write(&template_root, "node_modules/left-pad/index.js", "module.exports = 1;\n");
        write(&template_root, "CHANGELOG.md", "# Changelog\n");

        Self {
            _template: template,
            _cwd: cwd,
            template_root,
            cwd: cwd_root,
        }
    }
}

pub fn write(root: &Utf8Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
