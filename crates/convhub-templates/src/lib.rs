//! # convhub-templates
//!
//! Stores named conversion templates on disk, one directory per output
//! format: `{root}/{format}/{name}.template`. The layout is the only index;
//! nothing else is persisted.

pub mod catalog;
pub mod error;
pub mod models;
pub mod sanitize;

pub use catalog::TemplateCatalog;
pub use error::CatalogError;
pub use models::TemplateInfo;
pub use sanitize::{is_safe_segment, sanitize_name};
