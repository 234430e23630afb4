//! Template catalog errors.

use std::path::PathBuf;

use convhub_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors raised by [`crate::TemplateCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The format is not a valid conversion target.
    #[error("Format '{format}' is not supported")]
    InvalidFormat {
        /// The rejected format.
        format: String,
    },

    /// The resolved template name is empty after sanitization.
    #[error("Template name is empty after sanitization")]
    InvalidName,

    /// A template with this name already exists for the format.
    #[error("Template '{name}' already exists for format '{format}'")]
    AlreadyExists {
        /// Template name.
        name: String,
        /// Template format.
        format: String,
    },

    /// No template with this name exists for the format.
    #[error("Template '{name}' not found for format '{format}'")]
    NotFound {
        /// Template name.
        name: String,
        /// Template format.
        format: String,
    },

    /// The catalog root cannot be created or written to.
    #[error("Templates root '{path}' is unavailable: {source}")]
    RootUnavailable {
        /// Configured root path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("Template storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid_format",
            Self::InvalidName => "invalid_template_name",
            Self::AlreadyExists { .. } => "template_already_exists",
            Self::NotFound { .. } => "template_not_found",
            Self::RootUnavailable { .. } => "templates_root_unavailable",
            Self::Io(_) => "storage_error",
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let kind = match &err {
            CatalogError::InvalidFormat { .. } | CatalogError::InvalidName => ErrorKind::Validation,
            CatalogError::AlreadyExists { .. } => ErrorKind::Conflict,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::RootUnavailable { .. } => ErrorKind::Configuration,
            CatalogError::Io(_) => ErrorKind::Storage,
        };
        AppError::new(kind, err.to_string()).with_code(err.code())
    }
}
