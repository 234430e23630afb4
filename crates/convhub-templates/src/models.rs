//! Template metadata returned by the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored template as seen through the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    /// Sanitized name (file name without extension).
    pub name: String,
    /// Target format the template applies to.
    pub format: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, or last modification where the filesystem has no birth time.
    pub created_at: DateTime<Utc>,
    /// Public retrieval path, `/templates/{format}/{filename}`.
    pub path: String,
}

impl TemplateInfo {
    /// Build the public retrieval path for a stored file.
    pub fn public_path(format: &str, file_name: &str) -> String {
        format!("/templates/{format}/{file_name}")
    }
}
