//! Template catalog handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use convhub_core::error::AppError;
use convhub_templates::{CatalogError, TemplateInfo, is_safe_segment, sanitize_name};

use crate::dto::request::{AddTemplateQuery, ListTemplatesQuery};
use crate::dto::response::{TemplateListResponse, TemplateMessageResponse, TemplateRef};
use crate::error::ApiResult;
use crate::extractors::receive_file;
use crate::state::AppState;

/// GET /api/templates?format=
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> ApiResult<Json<TemplateListResponse>> {
    let format = query.format.as_deref().filter(|f| !f.is_empty());
    let templates = state.catalog.list(format).await?;
    Ok(Json(TemplateListResponse { templates }))
}

/// POST /api/templates/{format}?name=
pub async fn add_template(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<AddTemplateQuery>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<TemplateMessageResponse<TemplateInfo>>)> {
    let upload = receive_file(&mut multipart, &state.upload_dir)
        .await?
        .ok_or_else(|| AppError::validation("No file provided").with_code("invalid_file"))?;

    let template = state
        .catalog
        .add(upload.file(), &format, query.name.as_deref())
        .await?;

    tracing::info!(
        name = %template.name,
        format = %template.format,
        size = template.size,
        "Template added"
    );

    Ok((
        StatusCode::CREATED,
        Json(TemplateMessageResponse {
            message: "Template added successfully".to_string(),
            template,
        }),
    ))
}

/// DELETE /api/templates/{format}/{name}
pub async fn delete_template(
    State(state): State<AppState>,
    Path((format, name)): Path<(String, String)>,
) -> ApiResult<Json<TemplateMessageResponse<TemplateRef>>> {
    // The catalog joins names verbatim; only names it could have stored get through.
    if name.is_empty() || sanitize_name(&name) != name || !is_safe_segment(&format) {
        return Err(CatalogError::NotFound { name, format }.into());
    }

    state.catalog.delete(&format, &name).await?;
    tracing::info!(name = %name, format = %format, "Template deleted");

    Ok(Json(TemplateMessageResponse {
        message: "Template deleted successfully".to_string(),
        template: TemplateRef { name, format },
    }))
}
