//! Data types shared by the parser, the orchestrator, and engines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use convhub_core::formats::base_format;

use crate::job::JobDir;

/// Value of an engine flag: a bare switch or a string argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// `--name`
    Bool(bool),
    /// `--name=value`
    Text(String),
}

/// A decoded command string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Source format; when absent the engine infers it from the input file.
    pub from: Option<String>,
    /// Target format, possibly with extension suffixes.
    pub to: String,
    /// Everything else, passed to the engine.
    pub flags: BTreeMap<String, FlagValue>,
    /// Template to apply, looked up under the target format.
    pub template_name: Option<String>,
}

impl ConversionOptions {
    /// Options converting to `to` with nothing else set.
    pub fn to(format: impl Into<String>) -> Self {
        Self {
            from: None,
            to: format.into(),
            flags: BTreeMap::new(),
            template_name: None,
        }
    }

    /// Target format without extension suffixes; this is the template namespace.
    pub fn target_format(&self) -> &str {
        base_format(&self.to)
    }
}

/// Everything an engine needs for one run.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Document to read.
    pub input_path: PathBuf,
    /// Where the engine must write its result.
    pub output_path: PathBuf,
    /// Source format, if known.
    pub from: Option<String>,
    /// Target format.
    pub to: String,
    /// Pass-through flags.
    pub flags: BTreeMap<String, FlagValue>,
    /// Resolved template file.
    pub template_path: Option<PathBuf>,
}

/// A finished conversion.
///
/// The output lives in a per-job directory that is removed when this value
/// is dropped, so keep it alive until the file has been sent.
#[derive(Debug)]
pub struct ConversionOutput {
    path: PathBuf,
    extension: String,
    mime_type: &'static str,
    job: JobDir,
}

impl ConversionOutput {
    pub(crate) fn new(
        path: PathBuf,
        extension: String,
        mime_type: &'static str,
        job: JobDir,
    ) -> Self {
        Self {
            path,
            extension,
            mime_type,
            job,
        }
    }

    /// Output file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output file extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Working directory holding the output.
    pub fn job_dir(&self) -> &Path {
        self.job.path()
    }
}
