//! # convhub-core
//!
//! Core crate for ConvHub. Contains the unified error system, configuration
//! schemas, the registry of document formats and conversion flags, and the
//! value types shared between crates.
//!
//! This crate has **no** internal dependencies on other ConvHub crates.

pub mod config;
pub mod error;
pub mod formats;
pub mod result;
pub mod types;

pub use error::AppError;
pub use formats::FormatRegistry;
pub use result::AppResult;
