//! Spools the multipart `file` field to a temporary file.

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use convhub_core::error::AppError;
use convhub_core::types::UploadedFile;

use crate::error::ApiError;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// An uploaded file on local disk, deleted when dropped.
#[derive(Debug)]
pub struct TempUpload {
    file: UploadedFile,
}

impl TempUpload {
    /// The upload as handed to the catalog and the converter.
    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Local path of the spooled bytes.
    pub fn path(&self) -> &Path {
        &self.file.local_path
    }

    /// File name sent by the client, without any directory part.
    pub fn original_filename(&self) -> &str {
        &self.file.original_filename
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.file.local_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.file.local_path.display(),
                    error = %e,
                    "Failed to remove uploaded file"
                );
            }
        }
    }
}

/// Read the multipart body, writing the `file` field under `upload_dir`.
///
/// Returns `None` when the body has no `file` field. Other fields are
/// skipped.
pub async fn receive_file(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<Option<TempUpload>, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_filename = client_file_name(field.file_name());
        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create upload dir: {e}")))?;

        let upload = TempUpload {
            file: UploadedFile::new(
                spool_path(upload_dir, &original_filename),
                original_filename,
            ),
        };

        let mut out = tokio::fs::File::create(upload.path())
            .await
            .map_err(|e| AppError::storage(format!("Failed to create upload file: {e}")))?;

        let mut size: u64 = 0;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            size += chunk.len() as u64;
            out.write_all(&chunk)
                .await
                .map_err(|e| AppError::storage(format!("Failed to write upload: {e}")))?;
        }
        out.flush()
            .await
            .map_err(|e| AppError::storage(format!("Failed to write upload: {e}")))?;

        tracing::debug!(
            filename = %upload.original_filename(),
            size,
            path = %upload.path().display(),
            "Received upload"
        );
        return Ok(Some(upload));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation(format!("Upload too large: {}", e.body_text()))
            .with_code("payload_too_large")
            .into()
    } else {
        AppError::validation(format!("Invalid multipart body: {}", e.body_text()))
            .with_code("invalid_request")
            .into()
    }
}

/// Base name of the client-supplied file name, or `upload`.
fn client_file_name(name: Option<&str>) -> String {
    name.and_then(|n| n.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .unwrap_or("upload")
        .to_string()
}

/// `{upload_dir}/{uuid}.{ext}`, keeping a safe extension so the engine can
/// infer the source format.
fn spool_path(upload_dir: &Path, original_filename: &str) -> PathBuf {
    let id = Uuid::new_v4().simple().to_string();
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 16 && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => upload_dir.join(format!("{id}.{ext}")),
        None => upload_dir.join(id),
    }
}
