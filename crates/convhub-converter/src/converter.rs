//! Conversion orchestrator: template resolution, concurrency limiting,
//! per-job working directories and timeouts around a [`ConversionEngine`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use convhub_core::config::ConverterConfig;
use convhub_core::formats::{mime_type, output_extension};
use convhub_templates::{TemplateCatalog, sanitize_name};

use crate::engine::ConversionEngine;
use crate::error::ConversionError;
use crate::job::JobDir;
use crate::models::{ConversionOptions, ConversionOutput, EngineRequest};

/// Runs conversions requested through parsed commands.
#[derive(Debug, Clone)]
pub struct Converter {
    engine: Arc<dyn ConversionEngine>,
    catalog: TemplateCatalog,
    work_dir: PathBuf,
    timeout: Duration,
    limiter: Arc<Semaphore>,
}

impl Converter {
    /// Create an orchestrator.
    ///
    /// `work_dir` receives one subdirectory per conversion. At most
    /// `max_concurrent` engine runs proceed at once; the rest wait.
    pub fn new(
        engine: Arc<dyn ConversionEngine>,
        catalog: TemplateCatalog,
        work_dir: impl Into<PathBuf>,
        timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        let work_dir = work_dir.into();
        Self {
            engine,
            catalog,
            work_dir: std::path::absolute(&work_dir).unwrap_or(work_dir),
            timeout,
            limiter: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Create from the `[converter]` config section.
    pub fn from_config(
        config: &ConverterConfig,
        engine: Arc<dyn ConversionEngine>,
        catalog: TemplateCatalog,
    ) -> Self {
        Self::new(
            engine,
            catalog,
            config.effective_temp_dir().join("jobs"),
            Duration::from_secs(config.timeout_seconds),
            config.max_concurrent_conversions,
        )
    }

    /// The engine in use.
    pub fn engine(&self) -> &Arc<dyn ConversionEngine> {
        &self.engine
    }

    /// Convert `input` according to `options`.
    ///
    /// The returned output owns its working directory; dropping it (or
    /// dropping this future before it completes) removes the directory,
    /// and cancellation also kills the engine process.
    pub async fn convert(
        &self,
        input: &Path,
        options: &ConversionOptions,
    ) -> Result<ConversionOutput, ConversionError> {
        let template_path = self.resolve_template(options).await?;

        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| ConversionError::SlotsClosed)?;

        let job = JobDir::create(&self.work_dir).await?;
        let extension = output_extension(&options.to).to_string();
        let output_path = job.path().join(format!("output.{extension}"));

        let request = EngineRequest {
            input_path: std::path::absolute(input).unwrap_or_else(|_| input.to_path_buf()),
            output_path: output_path.clone(),
            from: options.from.clone(),
            to: options.to.clone(),
            flags: options.flags.clone(),
            template_path,
        };

        tracing::info!(
            engine = self.engine.name(),
            from = ?request.from,
            to = %request.to,
            template = ?request.template_path,
            job_dir = %job.path().display(),
            "Starting conversion"
        );

        let start = std::time::Instant::now();
        match tokio::time::timeout(self.timeout, self.engine.convert(&request)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Conversion failed");
                return Err(e);
            }
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Conversion timed out");
                return Err(ConversionError::Timeout {
                    timeout_seconds: self.timeout.as_secs(),
                });
            }
        }

        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            return Err(ConversionError::OutputMissing { path: output_path });
        }

        tracing::info!(
            to = %options.to,
            duration_ms = start.elapsed().as_millis() as u64,
            "Conversion completed"
        );

        Ok(ConversionOutput::new(
            output_path,
            extension,
            mime_type(&options.to),
            job,
        ))
    }

    /// Template file for `options`, re-checked on disk now.
    ///
    /// Names that are not already in sanitized form cannot have been
    /// stored by the catalog and never reach the filesystem.
    async fn resolve_template(
        &self,
        options: &ConversionOptions,
    ) -> Result<Option<PathBuf>, ConversionError> {
        let Some(ref name) = options.template_name else {
            return Ok(None);
        };
        let format = options.target_format();
        let not_found = || ConversionError::TemplateNotFound {
            name: name.clone(),
            format: format.to_string(),
        };

        if name.is_empty() || sanitize_name(name) != *name {
            return Err(not_found());
        }
        if !self.catalog.exists(format, name).await {
            return Err(not_found());
        }
        Ok(Some(self.catalog.template_path(format, name)))
    }
}
