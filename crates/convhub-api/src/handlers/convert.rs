//! Document conversion handler.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures::StreamExt;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tokio_util::io::ReaderStream;

use convhub_core::error::AppError;

use crate::error::ApiResult;
use crate::extractors::receive_file;
use crate::state::AppState;

/// POST /api/convert/{*command}
///
/// Streams the converted document back as an attachment named after the
/// uploaded file plus the output extension.
pub async fn convert(
    State(state): State<AppState>,
    Path(command): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let upload = receive_file(&mut multipart, &state.upload_dir)
        .await?
        .ok_or_else(|| AppError::validation("cannot find input file").with_code("invalid_file"))?;

    let options = state.parser.parse(&command)?;
    let output = state.converter.convert(upload.path(), &options).await?;
    let filename = download_name(upload.original_filename(), output.extension());
    drop(upload);

    let file = tokio::fs::File::open(output.path())
        .await
        .map_err(|e| AppError::internal(format!("Failed to open conversion output: {e}")))?;
    let size = file
        .metadata()
        .await
        .map_err(|e| AppError::internal(format!("Failed to read conversion output: {e}")))?
        .len();

    let content_type = output.mime_type();

    // The output (and its job directory) lives until the body is fully sent.
    let stream = ReaderStream::new(file).map(move |chunk| {
        let _ = &output;
        chunk
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// `<original name>.<ext>`; the original keeps its own extension.
fn download_name(original: &str, extension: &str) -> String {
    format!("{original}.{extension}")
}

/// `attachment` with an ASCII `filename` and, when needed, an RFC 5987
/// `filename*` carrying the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if ascii == filename {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            utf8_percent_encode(filename, NON_ALPHANUMERIC)
        )
    }
}
