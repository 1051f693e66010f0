//! Dump Job Model
//!
//! An assembled dump command together with the state of its execution.

use chrono::{DateTime, Local};
use std::time::Duration;
use uuid::Uuid;

/// Execution status of a dump job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStatus {
    /// Command assembled, not yet started
    #[default]
    Idle,
    /// Command is currently running
    Running,
    /// Command exited with code 0
    Succeeded,
    /// Command exited with a non-zero code
    Failed,
}

/// A shell command line and the file it writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCommand {
    /// Complete shell command line
    pub command_line: String,
    /// Dump file, `None` when dumping to stdout
    pub output_path: Option<String>,
}

/// One execution of an assembled dump command
#[derive(Debug, Clone)]
pub struct DumpJob {
    /// Unique identifier, used in log spans
    pub id: String,

    pub command: AssembledCommand,

    pub status: ExecutionStatus,

    /// When the job was started (in local time)
    pub started_at: Option<DateTime<Local>>,

    /// How long the command took (None until finished)
    pub execution_time: Option<Duration>,

    /// Exit code (None until finished)
    pub exit_code: Option<i32>,

    /// Captured output lines
    pub output: Vec<String>,
}

impl DumpJob {
    pub fn new(command: AssembledCommand) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            command,
            status: ExecutionStatus::Idle,
            started_at: None,
            execution_time: None,
            exit_code: None,
            output: Vec::new(),
        }
    }

    /// Mark the job as started
    pub fn mark_running(&mut self) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Local::now());
    }

    /// Record the exit of the command; non-zero exit codes fail the job
    pub fn mark_finished(&mut self, execution_time: Duration, exit_code: i32, output: Vec<String>) {
        self.status = if exit_code == 0 {
            ExecutionStatus::Succeeded
        } else {
            ExecutionStatus::Failed
        };
        self.execution_time = Some(execution_time);
        self.exit_code = Some(exit_code);
        self.output = output;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, ExecutionStatus::Running)
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.status, ExecutionStatus::Succeeded)
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, ExecutionStatus::Failed)
    }
}
