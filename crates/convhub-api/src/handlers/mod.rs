//! Route handlers organized by domain.

pub mod convert;
pub mod health;
pub mod help;
pub mod templates;

use axum::response::Redirect;

use convhub_core::error::AppError;

use crate::error::ApiError;

/// GET /
pub async fn root() -> Redirect {
    Redirect::temporary("/api/help")
}

/// Any unmatched route.
pub async fn not_found() -> ApiError {
    AppError::not_found("the requested path does not exist")
        .with_code("route_not_found")
        .into()
}
