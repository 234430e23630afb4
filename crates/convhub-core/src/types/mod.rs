//! Shared value types passed between crates.

pub mod upload;

pub use upload::UploadedFile;
