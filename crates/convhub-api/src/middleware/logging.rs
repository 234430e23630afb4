//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// `X-Powered-By` value, `convhub@<version>`.
pub const POWERED_BY: &str = concat!("convhub@", env!("CARGO_PKG_VERSION"));

/// Logs request method, path, status, and duration, and tags the response
/// with `X-Powered-By`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %uri.path(),
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
        .headers_mut()
        .insert("x-powered-by", HeaderValue::from_static(POWERED_BY));
    response
}
