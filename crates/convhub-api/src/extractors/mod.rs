//! Request extraction helpers.

pub mod upload;

pub use upload::{TempUpload, receive_file};
