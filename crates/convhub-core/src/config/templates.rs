//! Template catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where templates live on disk and which format directories are pre-created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Root directory; one subdirectory per output format.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// Format subdirectories created at startup.
    #[serde(default = "default_common_formats")]
    pub common_formats: Vec<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            common_formats: default_common_formats(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./data/templates")
}

/// Formats that get a template directory even before any upload.
pub fn default_common_formats() -> Vec<String> {
    ["html", "docx", "pdf", "latex", "markdown", "epub", "odt", "pptx"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}
