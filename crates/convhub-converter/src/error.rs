//! Error types for command parsing and conversion.
//!
//! Both enums map cleanly to `convhub_core::error::AppError`, carrying the
//! stable codes clients match on.

use std::path::PathBuf;

use convhub_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors from decoding a command string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command is empty or a reserved key has no value.
    #[error("Malformed command: {reason}")]
    Malformed {
        /// What was wrong.
        reason: String,
    },

    /// No `to` key was given.
    #[error("Missing target format: the command must contain 'to/<format>'")]
    MissingTargetFormat,

    /// The `to` value is not a writable format.
    #[error("Invalid target format '{format}'")]
    InvalidTargetFormat {
        /// The rejected value.
        format: String,
    },

    /// The `from` value is not a readable format.
    #[error("Invalid source format '{format}'")]
    InvalidSourceFormat {
        /// The rejected value.
        format: String,
    },
}

impl CommandError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed_command",
            Self::MissingTargetFormat => "missing_target_format",
            Self::InvalidTargetFormat { .. } => "invalid_target_format",
            Self::InvalidSourceFormat { .. } => "invalid_source_format",
        }
    }
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        AppError::new(ErrorKind::Validation, err.to_string()).with_code(err.code())
    }
}

/// Errors from running a conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The referenced template does not exist for the target format.
    #[error("Template '{name}' not found for format '{format}'")]
    TemplateNotFound {
        /// Requested template name.
        name: String,
        /// Target format namespace.
        format: String,
    },

    /// The engine ran and reported failure.
    #[error("Conversion failed: {diagnostic}")]
    Failed {
        /// Engine diagnostic text (truncated stderr).
        diagnostic: String,
    },

    /// The engine did not finish in time.
    #[error("Conversion timed out after {timeout_seconds}s")]
    Timeout {
        /// The limit that was exceeded.
        timeout_seconds: u64,
    },

    /// The engine exited cleanly but wrote nothing.
    #[error("Conversion produced no output file: {path}")]
    OutputMissing {
        /// Expected output path.
        path: PathBuf,
    },

    /// The concurrency limiter was shut down.
    #[error("Conversion slots unavailable")]
    SlotsClosed,

    /// Working directory or file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "template_not_found",
            Self::Failed { .. } | Self::OutputMissing { .. } => "conversion_failed",
            Self::Timeout { .. } => "conversion_timeout",
            Self::SlotsClosed => "service_unavailable",
            Self::Io(_) => "internal_error",
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        let kind = match &err {
            ConversionError::TemplateNotFound { .. } => ErrorKind::NotFound,
            ConversionError::Failed { .. } | ConversionError::OutputMissing { .. } => {
                ErrorKind::Unprocessable
            }
            ConversionError::Timeout { .. } => ErrorKind::Timeout,
            ConversionError::SlotsClosed => ErrorKind::ServiceUnavailable,
            ConversionError::Io(_) => ErrorKind::Internal,
        };
        AppError::new(kind, err.to_string()).with_code(err.code())
    }
}
