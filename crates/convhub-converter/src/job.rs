//! Per-conversion working directories.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

/// A unique working directory, removed with its contents on drop.
///
/// Dropping happens on success once the caller is done with the output, on
/// error, and when the request future is cancelled mid-conversion.
#[derive(Debug)]
pub struct JobDir {
    path: PathBuf,
}

impl JobDir {
    /// Create `{root}/{uuid}`.
    pub async fn create(root: &Path) -> std::io::Result<Self> {
        let path = root.join(Uuid::now_v7().simple().to_string());
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for JobDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    job_dir = %self.path.display(),
                    error = %e,
                    "Failed to clean up job directory"
                );
            }
        }
    }
}
