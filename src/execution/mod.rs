//! Shell command execution
//!
//! Runs an assembled command line through the platform shell, either with
//! the output streamed straight to the terminal or captured for reporting.

use crate::error::{Error, Result};
use crate::models::DumpJob;
use crate::platform::Platform;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;
use tracing::Instrument;

/// How the child's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Output goes directly to the controlling terminal
    Passthrough,
    /// stdout and stderr are collected into lines
    Captured,
}

/// Exit code and captured output of one command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionOutcome {
    /// Exit code, -1 when the child was terminated by a signal
    pub exit_code: i32,
    /// Captured lines, always empty in passthrough mode
    pub output: Vec<String>,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Something that can run a shell command line
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command line and wait for it to exit
    async fn run(&self, command_line: &str, mode: ExecutionMode) -> Result<ExecutionOutcome>;
}

/// Runs command lines through the platform shell
pub struct ShellExecutor {
    /// Shell executable
    shell: PathBuf,
    /// Flag introducing the command string (`-c`, `/C`)
    shell_flag: &'static str,
    /// Prepended to every command line so failing pipe stages are reported
    prelude: &'static str,
    /// Current working directory
    working_dir: PathBuf,
    /// Environment variables
    env_vars: HashMap<String, String>,
}

impl ShellExecutor {
    /// Create an executor using the platform shell
    pub fn new() -> Self {
        let shell_ops = Platform::shell();
        Self {
            shell: shell_ops.command_shell(),
            shell_flag: shell_ops.command_flag(),
            prelude: shell_ops.pipefail_prelude().unwrap_or_default(),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_vars: HashMap::new(),
        }
    }

    /// Set working directory
    pub fn set_working_dir(&mut self, dir: PathBuf) {
        self.working_dir = dir;
    }

    /// Use another shell executable
    pub fn set_shell(&mut self, shell: PathBuf) {
        self.shell = shell;
    }

    /// Set environment variable
    pub fn set_env(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    fn command(&self, command_line: &str) -> Command {
        let mut command = Command::new(&self.shell);
        command
            .arg(self.shell_flag)
            .arg(format!("{}{}", self.prelude, command_line))
            .current_dir(&self.working_dir)
            .envs(&self.env_vars);
        command
    }

    /// Spawn failures name the shell only; command lines carry the password
    fn spawn_error(&self, err: std::io::Error) -> Error {
        Error::CommandSpawnFailed {
            command: self.shell.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellExecutor {
    async fn run(&self, command_line: &str, mode: ExecutionMode) -> Result<ExecutionOutcome> {
        match mode {
            ExecutionMode::Passthrough => {
                let status = self
                    .command(command_line)
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(|e| self.spawn_error(e))?;

                Ok(ExecutionOutcome {
                    exit_code: status.code().unwrap_or(-1),
                    output: Vec::new(),
                })
            }
            ExecutionMode::Captured => {
                let output = self
                    .command(command_line)
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(|e| self.spawn_error(e))?;

                Ok(ExecutionOutcome {
                    exit_code: output.status.code().unwrap_or(-1),
                    output: output_lines(&output),
                })
            }
        }
    }
}

/// Non-blank stdout lines followed by non-blank stderr lines
fn output_lines(output: &Output) -> Vec<String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Run a dump job, recording its state transitions.
///
/// A non-zero exit is not an error here; callers inspect the job status.
pub async fn execute_job(
    runner: &dyn CommandRunner,
    job: &mut DumpJob,
    mode: ExecutionMode,
) -> Result<()> {
    let span = info_span!("dump_job", id = %job.id);

    async move {
        job.mark_running();
        debug!("Running dump command ({:?})", mode);
        let started = Instant::now();

        let outcome = runner.run(&job.command.command_line, mode).await?;
        job.mark_finished(started.elapsed(), outcome.exit_code, outcome.output);

        if job.succeeded() {
            info!("Dump command finished in {:?}", started.elapsed());
        } else {
            warn!("Dump command failed with return code {}", job.exit_code.unwrap_or(-1));
        }

        Ok(())
    }
    .instrument(span)
    .await
}

/// Fail with a missing-command error unless `program` is on the PATH
pub fn ensure_command_available(program: &str) -> Result<()> {
    match Platform::filesystem().find_command(program)? {
        Some(path) => {
            debug!("Using {} at {}", program, path.display());
            Ok(())
        }
        None => Err(Error::CommandNotFound {
            command: program.to_string(),
        }),
    }
}
