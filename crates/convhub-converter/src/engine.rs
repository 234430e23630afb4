//! Conversion engines.
//!
//! [`ConversionEngine`] is the seam between the orchestrator and the tool
//! that actually transforms documents. [`PandocEngine`] is the production
//! implementation; tests substitute in-process fakes.

use std::fmt::Debug;

use async_trait::async_trait;

use convhub_core::config::converter::ConverterConfig;
use convhub_core::formats::base_format;

use crate::error::ConversionError;
use crate::executor::{CommandExecutor, ExecutionParams, ExecutorError};
use crate::models::{EngineRequest, FlagValue};

/// Flags that would override arguments the engine adapter sets itself.
const ENGINE_OWNED_FLAGS: &[&str] = &[
    "output", "o", "template", "from", "f", "read", "r", "to", "t", "write", "w",
];

/// Something that can turn one document into another.
#[async_trait]
pub trait ConversionEngine: Send + Sync + Debug {
    /// Engine name, for logs and the health endpoint.
    fn name(&self) -> &str;

    /// Convert `request.input_path` into `request.output_path`.
    async fn convert(&self, request: &EngineRequest) -> Result<(), ConversionError>;

    /// Engine version, if it can be determined.
    async fn version(&self) -> Option<String> {
        None
    }
}

/// Runs the `pandoc` executable.
#[derive(Debug, Clone)]
pub struct PandocEngine {
    program: String,
    executor: CommandExecutor,
}

impl PandocEngine {
    /// Create an engine that runs `program` (a name on `PATH` or a full path).
    pub fn new(program: impl Into<String>, max_stderr_chars: usize) -> Self {
        Self {
            program: program.into(),
            executor: CommandExecutor::new(max_stderr_chars),
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.pandoc_path.clone(), config.max_stderr_chars)
    }

    /// Build the Pandoc argument list for a request.
    pub fn build_args(request: &EngineRequest) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(ref from) = request.from {
            args.push("--from".to_string());
            args.push(from.clone());
        }

        // Pandoc has no "pdf" writer; it picks the PDF path from the output extension.
        if base_format(&request.to) != "pdf" {
            args.push("--to".to_string());
            args.push(request.to.clone());
        }

        if let Some(ref template) = request.template_path {
            args.push("--template".to_string());
            args.push(template.display().to_string());
        }

        for (name, value) in &request.flags {
            if ENGINE_OWNED_FLAGS.contains(&name.as_str()) {
                tracing::warn!(flag = %name, "Ignoring flag controlled by the converter");
                continue;
            }
            if !is_flag_name(name) {
                tracing::warn!(flag = %name, "Ignoring flag with an invalid name");
                continue;
            }
            match value {
                FlagValue::Bool(true) => args.push(format!("--{name}")),
                FlagValue::Bool(false) => {}
                FlagValue::Text(text) => args.push(format!("--{name}={text}")),
            }
        }

        args.push("--output".to_string());
        args.push(request.output_path.display().to_string());
        args.push(request.input_path.display().to_string());
        args
    }
}

#[async_trait]
impl ConversionEngine for PandocEngine {
    fn name(&self) -> &str {
        "pandoc"
    }

    async fn convert(&self, request: &EngineRequest) -> Result<(), ConversionError> {
        let params = ExecutionParams {
            command: self.program.clone(),
            args: Self::build_args(request),
            working_dir: request.output_path.parent().map(|p| p.to_path_buf()),
        };

        match self.executor.execute(&params).await {
            Ok(result) => {
                if !result.stderr.trim().is_empty() {
                    tracing::debug!(stderr = %result.stderr.trim(), "Pandoc reported warnings");
                }
                Ok(())
            }
            Err(ExecutorError::ProcessFailed { stderr, code }) => {
                let diagnostic = if stderr.is_empty() {
                    format!("pandoc exited with code {code}")
                } else {
                    stderr
                };
                Err(ConversionError::Failed { diagnostic })
            }
            Err(e @ ExecutorError::CommandNotFound(_)) => Err(ConversionError::Failed {
                diagnostic: e.to_string(),
            }),
            Err(ExecutorError::IoError(e)) => Err(ConversionError::Failed {
                diagnostic: format!("failed to run pandoc: {e}"),
            }),
        }
    }

    async fn version(&self) -> Option<String> {
        let params = ExecutionParams {
            command: self.program.clone(),
            args: vec!["--version".to_string()],
            ..Default::default()
        };
        match self.executor.execute(&params).await {
            Ok(result) => result.stdout.lines().next().map(|l| l.trim().to_string()),
            Err(e) => {
                tracing::debug!(error = %e, "Could not determine pandoc version");
                None
            }
        }
    }
}

/// `[a-z][a-z0-9-]*`, the shape of every Pandoc long option.
fn is_flag_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
