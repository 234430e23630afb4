//! # convhub-api
//!
//! HTTP API layer for ConvHub built on Axum.
//!
//! Provides the conversion and template endpoints, upload spooling,
//! middleware (CORS, request logging), and the mapping from domain errors
//! to JSON error responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
