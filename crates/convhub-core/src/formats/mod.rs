//! Document formats and conversion flags known to ConvHub.

pub mod output;
pub mod registry;

pub use output::{mime_type, output_extension};
pub use registry::{FormatRegistry, base_format};
