//! Route definitions for the ConvHub HTTP API.
//!
//! All routes except the root redirect are mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.server.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(info_routes())
        .merge(template_routes())
        .merge(convert_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Help and health
fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/help", get(handlers::help::help))
        .route("/health", get(handlers::health::health))
}

/// Template catalog management
fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(handlers::templates::list_templates))
        .route("/templates/{format}", post(handlers::templates::add_template))
        .route(
            "/templates/{format}/{name}",
            delete(handlers::templates::delete_template),
        )
}

/// Conversion
fn convert_routes() -> Router<AppState> {
    Router::new().route("/convert/{*command}", post(handlers::convert::convert))
}
