//! Child process execution for conversion engines.
//!
//! Runs external tools with captured output. The child is killed when the
//! returned future is dropped, which is how timeouts and cancelled requests
//! stop a running engine.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

/// Errors from running a command.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The program could not be found.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// The process exited with a non-zero code.
    #[error("Process failed with exit code {code}: {stderr}")]
    ProcessFailed {
        /// The exit code, or -1 when terminated by a signal.
        code: i32,
        /// Captured standard error (truncated).
        stderr: String,
    },

    /// IO error while spawning or waiting.
    #[error("IO error during execution: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Standard output.
    pub stdout: String,
    /// Standard error (engines often warn here even on success).
    pub stderr: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// One command invocation.
#[derive(Debug, Clone, Default)]
pub struct ExecutionParams {
    /// Program to run.
    pub command: String,
    /// Arguments, passed verbatim without a shell.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: Option<PathBuf>,
}

/// Runs external commands, truncating captured stderr in errors.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    max_stderr_chars: usize,
}

impl CommandExecutor {
    /// Create an executor keeping at most `max_stderr_chars` of stderr in errors.
    pub fn new(max_stderr_chars: usize) -> Self {
        Self { max_stderr_chars }
    }

    /// Run a command to completion.
    pub async fn execute(&self, params: &ExecutionParams) -> Result<ExecutionResult, ExecutorError> {
        let start = std::time::Instant::now();

        tracing::debug!(
            command = %params.command,
            args = ?params.args,
            "Executing engine command"
        );

        let mut cmd = Command::new(&params.command);
        cmd.args(&params.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = params.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExecutorError::CommandNotFound(params.command.clone())
            } else {
                ExecutorError::IoError(e)
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            tracing::error!(
                command = %params.command,
                exit_code = code,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "Engine command failed"
            );
            return Err(ExecutorError::ProcessFailed {
                code,
                stderr: stderr.trim().chars().take(self.max_stderr_chars).collect(),
            });
        }

        tracing::debug!(command = %params.command, duration_ms, "Engine command completed");

        Ok(ExecutionResult {
            stdout,
            stderr,
            duration_ms,
        })
    }
}
