//! Usage text.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use convhub_converter::help_text;

use crate::state::AppState;

/// GET /api/help
pub async fn help(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        help_text(&state.registry),
    )
}
