//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{EngineHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = state.converter.engine();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: EngineHealth {
            name: engine.name().to_string(),
            version: engine.version().await,
        },
    })
}
