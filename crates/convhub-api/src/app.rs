//! Application builder: wires router, middleware and state into an Axum app
//! and runs the server.

use std::sync::Arc;

use axum::Router;

use convhub_converter::PandocEngine;
use convhub_core::config::AppConfig;
use convhub_core::AppResult;
use convhub_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the ConvHub server until Ctrl+C or SIGTERM.
///
/// Fails before binding when the template catalog root cannot be used.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting ConvHub server...");

    // ── Step 1: Conversion engine ────────────────────────────────
    let engine = Arc::new(PandocEngine::from_config(&config.converter));
    let state = AppState::new(config.clone(), engine);

    match state.converter.engine().version().await {
        Some(version) => tracing::info!(engine = %version, "Conversion engine available"),
        None => tracing::warn!(
            program = %config.converter.pandoc_path,
            "Conversion engine not found; conversions will fail until it is installed"
        ),
    }

    // ── Step 2: Template catalog ─────────────────────────────────
    state.catalog.initialize().await?;
    tracing::info!(root = %state.catalog.root().display(), "Template catalog ready");

    // ── Step 3: Working directories ──────────────────────────────
    create_work_directories(&state).await?;

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ConvHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("ConvHub server stopped");
    Ok(())
}

async fn create_work_directories(state: &AppState) -> AppResult<()> {
    let jobs_dir = state.config.converter.effective_temp_dir().join("jobs");
    for dir in [&state.upload_dir, &jobs_dir] {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::configuration(format!("Failed to create dir '{}': {e}", dir.display()))
        })?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
