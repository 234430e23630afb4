//! Filesystem-backed template catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use convhub_core::config::TemplatesConfig;
use convhub_core::formats::{FormatRegistry, base_format};
use convhub_core::types::UploadedFile;

use crate::error::CatalogError;
use crate::models::TemplateInfo;
use crate::sanitize::{is_safe_segment, name_from_filename, sanitize_name};

/// On-disk extension of every stored template.
pub const TEMPLATE_EXTENSION: &str = "template";

/// Named templates, one directory per target format.
///
/// Templates are immutable once added: adding an existing name fails and
/// there is no update-in-place. Writes are published with an exclusive
/// hard link, so two concurrent `add` calls for the same name cannot both
/// succeed and `list` never sees a half-written file.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    /// Root directory of the catalog.
    root: PathBuf,
    /// Format directories created by `initialize`.
    common_formats: Vec<String>,
    /// Used to validate formats on `add`.
    registry: Arc<FormatRegistry>,
}

impl TemplateCatalog {
    /// Create a catalog rooted at `root`. Nothing touches the disk until
    /// [`initialize`](Self::initialize) or the first operation.
    ///
    /// A relative root is resolved against the current directory here, so
    /// template paths stay valid for engines running in another directory.
    pub fn new(
        root: impl Into<PathBuf>,
        common_formats: Vec<String>,
        registry: Arc<FormatRegistry>,
    ) -> Self {
        let root = root.into();
        Self {
            root: std::path::absolute(&root).unwrap_or(root),
            common_formats,
            registry,
        }
    }

    /// Create a catalog from the `[templates]` config section.
    pub fn from_config(config: &TemplatesConfig, registry: Arc<FormatRegistry>) -> Self {
        Self::new(
            config.root_dir.clone(),
            config.common_formats.clone(),
            registry,
        )
    }

    /// Root directory of the catalog.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the root exists and is writable, then pre-create the common
    /// format directories. Safe to call repeatedly.
    ///
    /// Only a missing or read-only root is an error; a format directory that
    /// cannot be created is logged and skipped.
    pub async fn initialize(&self) -> Result<(), CatalogError> {
        let unavailable = |source| CatalogError::RootUnavailable {
            path: self.root.clone(),
            source,
        };

        fs::create_dir_all(&self.root).await.map_err(unavailable)?;

        let probe = self
            .root
            .join(format!(".write-probe-{}", Uuid::new_v4().simple()));
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&probe)
            .await
            .map_err(unavailable)?;
        fs::remove_file(&probe).await.map_err(unavailable)?;

        for format in &self.common_formats {
            let dir = self.root.join(format);
            if let Err(e) = fs::create_dir_all(&dir).await {
                warn!(
                    format = %format,
                    dir = %dir.display(),
                    error = %e,
                    "Could not create template directory for format"
                );
            }
        }

        info!(root = %self.root.display(), "Templates directory initialized");
        Ok(())
    }

    /// On-disk location of a template: `{root}/{format}/{name}.template`.
    ///
    /// `name` is used as-is; pass only names returned by `list` or `add`.
    pub fn template_path(&self, format: &str, name: &str) -> PathBuf {
        self.root
            .join(self.format_dir_name(format))
            .join(format!("{name}.{TEMPLATE_EXTENSION}"))
    }

    /// Directory name holding templates for `format`.
    ///
    /// Extensions on a known target are dropped (`markdown+smart` and
    /// `markdown-smart` both map to `markdown`); anything else is kept as
    /// given.
    pub fn format_dir_name<'a>(&self, format: &'a str) -> &'a str {
        if self.registry.is_valid_target_format(format) {
            base_format(format)
        } else {
            format
        }
    }

    /// Whether a template file exists right now.
    pub async fn exists(&self, format: &str, name: &str) -> bool {
        fs::metadata(self.template_path(format, name))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// List templates, optionally limited to one format.
    ///
    /// A missing root is recreated and yields an empty list. Order follows
    /// directory enumeration and is not sorted.
    pub async fn list(&self, format: Option<&str>) -> Result<Vec<TemplateInfo>, CatalogError> {
        if fs::metadata(&self.root).await.is_err() {
            if let Err(e) = self.initialize().await {
                warn!(error = %e, "Templates root missing and could not be recreated");
            }
            return Ok(Vec::new());
        }

        let formats = match format.map(|f| self.format_dir_name(f)) {
            Some(f) if is_safe_segment(f) => vec![f.to_string()],
            Some(f) => {
                debug!(format = %f, "Ignoring unsafe format filter");
                return Ok(Vec::new());
            }
            None => self.format_dirs().await?,
        };

        let mut templates = Vec::new();
        for format in formats {
            self.scan_format_dir(&format, &mut templates).await?;
        }

        Ok(templates)
    }

    /// Store a copy of an uploaded file as a new template.
    ///
    /// The name is `name` sanitized, or the upload's file stem sanitized when
    /// `name` is absent or empty. The uploaded file itself is left in place.
    pub async fn add(
        &self,
        upload: &UploadedFile,
        format: &str,
        name: Option<&str>,
    ) -> Result<TemplateInfo, CatalogError> {
        if !self.registry.is_valid_target_format(format) {
            return Err(CatalogError::InvalidFormat {
                format: format.to_string(),
            });
        }
        let format = self.format_dir_name(format);

        let name = match name.filter(|n| !n.is_empty()) {
            Some(n) => sanitize_name(n),
            None => name_from_filename(&upload.original_filename),
        };
        if name.is_empty() {
            return Err(CatalogError::InvalidName);
        }

        let target = self.template_path(format, &name);
        let already_exists = || CatalogError::AlreadyExists {
            name: name.clone(),
            format: format.to_string(),
        };

        if fs::metadata(&target).await.is_ok() {
            return Err(already_exists());
        }

        let format_dir = self.root.join(format);
        fs::create_dir_all(&format_dir).await?;

        let staging = format_dir.join(format!(".{name}.{}.partial", Uuid::new_v4().simple()));
        let published = match fs::copy(&upload.local_path, &staging).await {
            Ok(_) => fs::hard_link(&staging, &target).await,
            Err(e) => Err(e),
        };

        if let Err(e) = fs::remove_file(&staging).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
            }
        }

        match published {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(already_exists());
            }
            Err(e) => return Err(CatalogError::Io(e)),
        }

        let metadata = fs::metadata(&target).await?;
        let file_name = format!("{name}.{TEMPLATE_EXTENSION}");

        info!(format = %format, name = %name, size = metadata.len(), "Template added");

        Ok(TemplateInfo {
            path: TemplateInfo::public_path(format, &file_name),
            name,
            format: format.to_string(),
            size: metadata.len(),
            created_at: created_at(&metadata),
        })
    }

    /// Remove a template. Fails with `NotFound` if it is not there, so a
    /// second delete of the same name fails.
    ///
    /// `name` is not sanitized; pass only names returned by `list` or `add`.
    pub async fn delete(&self, format: &str, name: &str) -> Result<(), CatalogError> {
        let path = self.template_path(format, name);

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(format = %format, name = %name, "Template deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CatalogError::NotFound {
                name: name.to_string(),
                format: format.to_string(),
            }),
            Err(e) => Err(CatalogError::Io(e)),
        }
    }

    /// Every visible directory directly under the root.
    async fn format_dirs(&self) -> Result<Vec<String>, CatalogError> {
        let mut dirs = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = visible_name(&entry) else {
                continue;
            };
            match fs::metadata(entry.path()).await {
                Ok(m) if m.is_dir() => {}
                _ => continue,
            }
            // `html+x` would be addressed as `html`; its files are unreachable.
            if self.format_dir_name(&name) != name {
                debug!(dir = %name, "Skipping directory that is not a format namespace");
                continue;
            }
            dirs.push(name);
        }

        Ok(dirs)
    }

    /// Append every visible regular file in `{root}/{format}` to `out`.
    async fn scan_format_dir(
        &self,
        format: &str,
        out: &mut Vec<TemplateInfo>,
    ) -> Result<(), CatalogError> {
        let dir = self.root.join(format);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotADirectory => return Ok(()),
            Err(e) => return Err(CatalogError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Some(file_name) = visible_name(&entry) else {
                continue;
            };

            // Entries may vanish under a concurrent delete.
            let metadata = match fs::metadata(entry.path()).await {
                Ok(m) if !m.is_dir() => m,
                _ => continue,
            };

            let name = Path::new(&file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name.as_str())
                .to_string();

            out.push(TemplateInfo {
                name,
                format: format.to_string(),
                size: metadata.len(),
                created_at: created_at(&metadata),
                path: TemplateInfo::public_path(format, &file_name),
            });
        }

        Ok(())
    }
}

/// UTF-8 file name of a directory entry, or `None` for hidden entries.
fn visible_name(entry: &fs::DirEntry) -> Option<String> {
    let name = entry.file_name().into_string().ok()?;
    if name.starts_with('.') {
        None
    } else {
        Some(name)
    }
}

fn created_at(metadata: &std::fs::Metadata) -> DateTime<Utc> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| DateTime::<Utc>::from(SystemTime::UNIX_EPOCH))
}
