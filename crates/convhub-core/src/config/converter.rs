//! Conversion engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for invoking the external conversion engine (Pandoc).
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Pandoc executable, either a bare name resolved through `PATH` or a full path.
    #[serde(default = "default_pandoc_path")]
    pub pandoc_path: String,

    /// Timeout in seconds for a single engine invocation.
    #[serde(default = "default_timeout_seconds")]
    #[validate(range(min = 1, max = 3600))]
    pub timeout_seconds: u64,

    /// Limit on engine processes running at the same time.
    #[serde(default = "default_max_concurrent")]
    #[validate(range(min = 1, max = 64))]
    pub max_concurrent_conversions: usize,

    /// Root for uploads and per-job working directories.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Maximum characters of engine stderr kept in error messages.
    #[serde(default = "default_max_stderr_chars")]
    pub max_stderr_chars: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            pandoc_path: default_pandoc_path(),
            timeout_seconds: default_timeout_seconds(),
            max_concurrent_conversions: default_max_concurrent(),
            temp_dir: None,
            max_stderr_chars: default_max_stderr_chars(),
        }
    }
}

impl ConverterConfig {
    /// Resolve the effective temp directory as an absolute path.
    pub fn effective_temp_dir(&self) -> PathBuf {
        let dir = self
            .temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("convhub"));
        std::path::absolute(&dir).unwrap_or(dir)
    }
}

fn default_pandoc_path() -> String {
    "pandoc".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_max_concurrent() -> usize {
    4
}

fn default_max_stderr_chars() -> usize {
    2000
}
