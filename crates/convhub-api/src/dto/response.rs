//! Response DTOs.

use serde::{Deserialize, Serialize};

use convhub_templates::TemplateInfo;

/// `{"templates": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListResponse {
    /// Templates found.
    pub templates: Vec<TemplateInfo>,
}

/// Confirmation carrying the affected template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMessageResponse<T> {
    /// Human-readable message.
    pub message: String,
    /// The template concerned.
    pub template: T,
}

/// Identifies a template that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRef {
    /// Template name.
    pub name: String,
    /// Template format.
    pub format: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Conversion engine details.
    pub engine: EngineHealth,
}

/// Conversion engine details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineHealth {
    /// Engine name.
    pub name: String,
    /// First line of the engine's version output, when it can be run.
    pub version: Option<String>,
}
