//! The hand-off from the upload layer to the catalog and the converter.

use std::path::PathBuf;

/// A received file, already written to local disk.
///
/// The upload layer owns the file's lifetime; consumers only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Where the bytes were written.
    pub local_path: PathBuf,
    /// File name as sent by the client.
    pub original_filename: String,
}

impl UploadedFile {
    /// Create a new upload descriptor.
    pub fn new(local_path: impl Into<PathBuf>, original_filename: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            original_filename: original_filename.into(),
        }
    }
}
